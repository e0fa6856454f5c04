//! Command-line driver for `spn-ddt-rs`.

#![forbid(unsafe_code)]

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::seq::SliceRandom;
use rand::RngCore;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use spn_core::{
    gift, ivlbc, BitPermutation, Cipher, LinearLayer, NibbleMatrix, Sbox, State, Width,
};
use spnddt_gen::{DdtInstance, DenseDdt, RoundTable, SparseDdt};
use spnddt_solver::{greedy_cover, partition};

/// SPN differential-analysis CLI.
#[derive(Parser)]
#[command(
    name = "spnddt",
    version,
    author,
    about = "Differential distribution tables and cover selection for small-block SPNs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the dense DDT and run the greedy cover selection.
    Dense {
        #[command(flatten)]
        cipher: CipherOpts,
        /// Deduplicate identical rows before the cover step.
        #[arg(long, default_value_t = false)]
        dedup_rows: bool,
        /// Write the DDT rows (bincode) for an external cover solver.
        #[arg(long, value_name = "FILE")]
        export: Option<PathBuf>,
    },
    /// Compute reach sets for chosen representatives and partition them.
    Sparse {
        #[command(flatten)]
        cipher: CipherOpts,
        /// Representative input differences, comma separated.
        #[arg(long, value_name = "LIST")]
        reps: String,
    },
    /// Run the dense pipeline on a random cipher at a small width.
    Demo {
        /// Block width in bits (multiple of 4).
        #[arg(long, default_value_t = 8)]
        width: u32,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Cipher selection shared by the analysis commands.
#[derive(Args)]
struct CipherOpts {
    /// Named preset model.
    #[arg(long, value_enum, conflicts_with_all = ["width", "sbox", "perm", "mix"])]
    cipher: Option<Preset>,
    /// Block width in bits for a custom cipher (multiple of 4).
    #[arg(long)]
    width: Option<u32>,
    /// Custom S-box as 16 hex digits, the image of 0 first.
    #[arg(long, value_name = "HEX")]
    sbox: Option<String>,
    /// Custom bit permutation as comma-separated destination positions.
    #[arg(long, value_name = "LIST", conflicts_with = "mix")]
    perm: Option<String>,
    /// Custom 4x4 mix matrix as four comma-separated binary rows.
    #[arg(long, value_name = "ROWS")]
    mix: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    /// 16-bit GIFT model.
    Gift,
    /// 16-bit IVLBC model.
    Ivlbc,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Dense {
            cipher,
            dedup_rows,
            export,
        } => cmd_dense(&cipher, dedup_rows, export.as_ref()),
        Commands::Sparse { cipher, reps } => cmd_sparse(&cipher, &reps),
        Commands::Demo { width, seed } => cmd_demo(width, seed),
    }
}

fn cmd_dense(opts: &CipherOpts, dedup_rows: bool, export: Option<&PathBuf>) -> Result<()> {
    let cipher = build_cipher(opts)?;
    run_dense(&cipher, dedup_rows, export)
}

fn run_dense(cipher: &Cipher, dedup_rows: bool, export: Option<&PathBuf>) -> Result<()> {
    let size = cipher.width().size();
    println!("block width: {} bits ({} states)", cipher.width().bits(), size);

    let start = Instant::now();
    let table = RoundTable::build(cipher);
    println!("round table: {} entries ({:.2?})", table.len(), start.elapsed());

    let start = Instant::now();
    let ddt = DenseDdt::build(&table);
    println!(
        "dense ddt: {} rows, {} non-zero ({:.2?})",
        ddt.rows().len(),
        ddt.non_zero_rows(),
        start.elapsed()
    );

    if let Some(path) = export {
        let instance = if dedup_rows {
            DdtInstance::from_dense_deduped(&ddt)
        } else {
            DdtInstance::from_dense(&ddt)
        };
        let bytes = instance.to_bytes().context("serialize ddt instance")?;
        fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
        println!("exported {} rows to {}", instance.params.rows, path.display());
    }

    let start = Instant::now();
    let selected = if dedup_rows {
        let (rows, labels) = ddt.dedup_rows();
        println!("cover mode: deduped ({} unique rows)", rows.len());
        let picks = greedy_cover(&rows, size)?;
        picks.iter().map(|&idx| labels[idx]).collect::<Vec<State>>()
    } else {
        println!("cover mode: full");
        let picks = greedy_cover(ddt.rows(), size)?;
        picks.iter().map(|&idx| idx as State).collect()
    };
    println!("greedy cover: {} rows ({:.2?})", selected.len(), start.elapsed());
    println!("selected output differences: {selected:?}");
    Ok(())
}

fn cmd_sparse(opts: &CipherOpts, reps: &str) -> Result<()> {
    let cipher = build_cipher(opts)?;
    let reps = parse_rep_list(reps)?;
    if reps.is_empty() {
        bail!("at least one representative is required");
    }

    let start = Instant::now();
    let table = RoundTable::build(&cipher);
    println!("round table: {} entries ({:.2?})", table.len(), start.elapsed());

    let start = Instant::now();
    let sparse = SparseDdt::build(&table, &reps)?;
    println!(
        "reach sets: {} representatives ({:.2?})",
        reps.len(),
        start.elapsed()
    );
    for (rep, reach) in sparse.reach() {
        println!("reach[{rep}] = {}", reach.count_ones());
    }

    let part = partition(&sparse);
    for (rep, claim) in part.claims() {
        println!("claim[{rep}] = {}", claim.count_ones());
    }
    println!("claimed total: {}", part.claimed_total());
    if part.is_complete() {
        println!("uncovered: none");
    } else {
        let uncovered: Vec<usize> = part.uncovered().iter_ones().collect();
        println!("uncovered: {} differences", uncovered.len());
        println!("{uncovered:?}");
    }
    Ok(())
}

fn cmd_demo(bits: u32, seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let width = Width::new(bits)?;

    let mut table: [u8; 16] = core::array::from_fn(|i| i as u8);
    table.shuffle(&mut rng);
    let sbox = Sbox::new(table)?;

    let mut map: Vec<u8> = (0..bits as u8).collect();
    map.shuffle(&mut rng);
    let perm = BitPermutation::new(map)?;

    let cipher = Cipher::new(width, sbox, LinearLayer::BitPermutation(perm))?;
    println!("demo s-box: {:x?}", cipher.sbox().entries());
    if let LinearLayer::BitPermutation(perm) = cipher.linear() {
        println!("demo permutation: {:?}", perm.destinations());
    }
    run_dense(&cipher, false, None)
}

fn build_cipher(opts: &CipherOpts) -> Result<Cipher> {
    if let Some(preset) = opts.cipher {
        return Ok(match preset {
            Preset::Gift => gift(),
            Preset::Ivlbc => ivlbc(),
        });
    }

    let bits = match opts.width {
        Some(bits) => bits,
        None => bail!("either --cipher or --width with --sbox and a linear layer is required"),
    };
    let width = Width::new(bits)?;
    let sbox_hex = opts
        .sbox
        .as_deref()
        .context("--sbox is required for a custom cipher")?;
    let sbox = parse_sbox_hex(sbox_hex)?;
    let linear = match (&opts.perm, &opts.mix) {
        (Some(perm), None) => LinearLayer::BitPermutation(parse_perm_list(perm)?),
        (None, Some(mix)) => LinearLayer::NibbleMatrix(parse_mix_rows(mix)?),
        _ => bail!("a custom cipher needs exactly one of --perm or --mix"),
    };
    Ok(Cipher::new(width, sbox, linear)?)
}

fn parse_sbox_hex(hex_str: &str) -> Result<Sbox> {
    let bytes = hex::decode(hex_str.trim()).context("decode s-box hex")?;
    if bytes.len() != 8 {
        bail!("s-box must be 16 hex digits (16 nibbles)");
    }
    let mut table = [0u8; 16];
    for (i, byte) in bytes.iter().enumerate() {
        table[2 * i] = byte >> 4;
        table[2 * i + 1] = byte & 0xf;
    }
    Ok(Sbox::new(table)?)
}

fn parse_perm_list(list: &str) -> Result<BitPermutation> {
    let mut map = Vec::new();
    for item in list.split(',') {
        let dest: u8 = item
            .trim()
            .parse()
            .with_context(|| format!("parse permutation entry {item:?}"))?;
        map.push(dest);
    }
    Ok(BitPermutation::new(map)?)
}

fn parse_mix_rows(rows_str: &str) -> Result<NibbleMatrix> {
    let parts: Vec<&str> = rows_str.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        bail!("mix matrix needs four comma-separated rows");
    }
    let mut rows = [[0u8; 4]; 4];
    for (row_idx, part) in parts.iter().enumerate() {
        if part.len() != 4 {
            bail!("mix matrix row {row_idx} must be four binary digits");
        }
        for (col, ch) in part.chars().enumerate() {
            rows[row_idx][col] = match ch {
                '0' => 0,
                '1' => 1,
                other => bail!("mix matrix row {row_idx} has a non-binary digit {other:?}"),
            };
        }
    }
    Ok(NibbleMatrix::new(rows)?)
}

fn parse_rep_list(list: &str) -> Result<Vec<State>> {
    let mut reps = Vec::new();
    for item in list.split(',') {
        let rep: State = item
            .trim()
            .parse()
            .with_context(|| format!("parse representative {item:?}"))?;
        reps.push(rep);
    }
    Ok(reps)
}

fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}
