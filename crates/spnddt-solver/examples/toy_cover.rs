//! Runs the dense pipeline on a toy 8-bit SPN and prints the greedy cover.

use spn_core::{BitPermutation, Cipher, LinearLayer, Sbox, Width, GIFT_SBOX};
use spnddt_gen::{BitSet, DenseDdt, RoundTable};
use spnddt_solver::greedy_cover;

fn main() {
    let width = Width::new(8).expect("8 bits is a valid width");
    let sbox = Sbox::new(GIFT_SBOX).expect("GIFT s-box is bijective");
    let perm = BitPermutation::new(vec![0, 2, 4, 6, 1, 3, 5, 7]).expect("valid permutation");
    let cipher =
        Cipher::new(width, sbox, LinearLayer::BitPermutation(perm)).expect("consistent cipher");

    let table = RoundTable::build(&cipher);
    let ddt = DenseDdt::build(&table);
    let selected = greedy_cover(ddt.rows(), width.size()).expect("full dense ddt is coverable");

    let mut union = BitSet::new(width.size());
    for &idx in &selected {
        union.union_with(&ddt.rows()[idx]);
    }
    assert!(union.is_full());

    println!("selected {} rows: {:?}", selected.len(), selected);
    println!("example succeeded; selected rows cover every input difference");
}
