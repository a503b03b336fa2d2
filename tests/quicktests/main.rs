//! Tests that drive every tree purely through the `OrderedMap` contract.

use quickcheck::{Arbitrary, Gen};

mod contract;
mod scenarios;

/// An enum for the various kinds of "things" to do to
/// a map in a quicktest.
#[derive(Copy, Clone, Debug)]
pub enum Op<K, V> {
    /// Insert the K, V into the data structure
    Insert(K, V),
    /// Erase the K from the data structure
    Erase(K),
    /// Drop everything
    Clean,
}

impl<K, V> Arbitrary for Op<K, V>
where
    K: Arbitrary,
    V: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 0, 1, 1, 2]).copied().unwrap_or(0) {
            0 => Op::Insert(K::arbitrary(g), V::arbitrary(g)),
            1 => Op::Erase(K::arbitrary(g)),
            _ => Op::Clean,
        }
    }
}

/// Routes `log` records to the test harness' captured output.
pub fn init_logging() {
    let _ = simplelog::TestLogger::init(log::LevelFilter::Trace, simplelog::Config::default());
}
