//! Windowed precomputation table for fixed-base exponentiation.
//!
//! For a fixed base `g` and modulus `N`, the table stores
//! `T[i][v] = g^{v·2^{i·b}} mod N` for every chunk index `i` and every chunk
//! value `v < 2^b`, where `b` is the chunk width in bits. Computing
//! `g^x mod N` then decomposes `x` into base-`2^b` digits and multiplies one
//! table entry per digit, with no squarings on the hot path. That is what
//! makes batch accumulator exponents with hundreds of thousands of bits
//! tractable.
//!
//! Tables are immutable after construction and freely shareable across
//! threads. Digit products are commutative, so `compute` shards the digit
//! range across workers and folds the partial products into a mutexed
//! accumulator in whatever order the workers finish.

use core::fmt;
use std::sync::Mutex;
use std::thread;

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Widest supported chunk, in bytes. Each row stores `2^(8·chunk)` entries,
/// so two bytes (65536 entries per row) is the practical ceiling before the
/// table stops fitting in memory for 2048-bit moduli.
const MAX_CHUNK_BYTES: usize = 2;

/// Errors surfaced by table construction and evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// `chunk_byte_size` is zero or wider than [`MAX_CHUNK_BYTES`].
    InvalidChunkSize { chunk_bytes: usize },
    /// A bound parameter (element bound, batch hint, modulus) is degenerate.
    InvalidBound(&'static str),
    /// `compute` was asked to run with zero workers.
    InvalidWorkerCount,
    /// The exponent does not fit the precomputed range; the caller must size
    /// the table for its batch instead of relying on silent clamping.
    ExponentTooWide { bits: usize, capacity: usize },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::InvalidChunkSize { chunk_bytes } => {
                write!(f, "invalid chunk byte size {chunk_bytes}, expected 1..={MAX_CHUNK_BYTES}")
            }
            TableError::InvalidBound(reason) => write!(f, "invalid table bound: {reason}"),
            TableError::InvalidWorkerCount => write!(f, "worker count must be at least one"),
            TableError::ExponentTooWide { bits, capacity } => write!(
                f,
                "exponent of {bits} bits exceeds the table capacity of {capacity} bits"
            ),
        }
    }
}

impl std::error::Error for TableError {}

/// Precomputed window table for a fixed `(g, N)` pair.
pub struct PrecomputeTable {
    modulus: BigUint,
    chunk_bytes: usize,
    chunk_bits: usize,
    rows: Vec<Vec<BigUint>>,
}

impl PrecomputeTable {
    /// Builds the table for exponents up to
    /// `bits(elem_upper_bound) · batch_size_hint` bits.
    ///
    /// `elem_upper_bound` bounds a single representative and
    /// `batch_size_hint` the number of representatives multiplied into one
    /// exponent. Row bases are chained by `b` squarings; the power rows are
    /// filled in parallel when the `parallel` feature is active.
    pub fn new(
        g: &BigUint,
        modulus: &BigUint,
        elem_upper_bound: &BigUint,
        batch_size_hint: usize,
        chunk_byte_size: usize,
    ) -> Result<Self, TableError> {
        if chunk_byte_size == 0 || chunk_byte_size > MAX_CHUNK_BYTES {
            return Err(TableError::InvalidChunkSize {
                chunk_bytes: chunk_byte_size,
            });
        }
        if batch_size_hint == 0 {
            return Err(TableError::InvalidBound("batch size hint must be positive"));
        }
        if elem_upper_bound.bits() < 2 {
            return Err(TableError::InvalidBound("element upper bound must exceed one"));
        }
        if modulus.bits() < 2 {
            return Err(TableError::InvalidBound("modulus must exceed one"));
        }

        let chunk_bits = 8 * chunk_byte_size;
        let exponent_bits = elem_upper_bound.bits() * batch_size_hint;
        let row_count = exponent_bits.div_ceil(chunk_bits);
        let row_width = 1usize << chunk_bits;

        // T[i][1] = T[i-1][1]^(2^b), seeded with g itself.
        let mut bases = Vec::with_capacity(row_count);
        let mut base = g % modulus;
        for _ in 0..row_count {
            bases.push(base.clone());
            for _ in 0..chunk_bits {
                base = &base * &base % modulus;
            }
        }

        let fill_row = |base: &BigUint| -> Vec<BigUint> {
            let mut row = Vec::with_capacity(row_width);
            row.push(BigUint::one());
            let mut power = BigUint::one();
            for _ in 1..row_width {
                power = &power * base % modulus;
                row.push(power.clone());
            }
            row
        };

        #[cfg(feature = "parallel")]
        let rows: Vec<Vec<BigUint>> = if crate::utils::parallelism_enabled() {
            use rayon::prelude::*;
            bases.par_iter().map(fill_row).collect()
        } else {
            bases.iter().map(fill_row).collect()
        };
        #[cfg(not(feature = "parallel"))]
        let rows: Vec<Vec<BigUint>> = bases.iter().map(fill_row).collect();

        Ok(Self {
            modulus: modulus.clone(),
            chunk_bytes: chunk_byte_size,
            chunk_bits,
            rows,
        })
    }

    /// Chunk width in bits.
    pub fn chunk_bits(&self) -> usize {
        self.chunk_bits
    }

    /// Number of chunk rows.
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Widest exponent, in bits, the table can evaluate.
    pub fn capacity_bits(&self) -> usize {
        self.rows.len() * self.chunk_bits
    }

    /// Modulus the table was built for.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Evaluates `g^x mod N` from the table.
    ///
    /// The digit products are folded across `num_workers` shards; results
    /// arrive unordered and are multiplied into a mutexed accumulator.
    /// Exponents wider than [`Self::capacity_bits`] are rejected.
    pub fn compute(&self, x: &BigUint, num_workers: usize) -> Result<BigUint, TableError> {
        if num_workers == 0 {
            return Err(TableError::InvalidWorkerCount);
        }
        let bits = x.bits();
        if bits > self.capacity_bits() {
            return Err(TableError::ExponentTooWide {
                bits,
                capacity: self.capacity_bits(),
            });
        }
        if x.is_zero() {
            return Ok(BigUint::one() % &self.modulus);
        }

        let digits = self.digits(x);
        let workers = num_workers.min(digits.len());
        if workers <= 1 || !crate::utils::parallelism_enabled() {
            return Ok(self.shard_product(&digits, 0));
        }

        let accumulator = Mutex::new(BigUint::one());
        thread::scope(|scope| {
            for shard in crate::utils::shard_ranges(digits.len(), workers) {
                let accumulator = &accumulator;
                let digits = &digits;
                let (start, end) = (shard.start, shard.end);
                scope.spawn(move || {
                    let partial = self.shard_product(&digits[start..end], start);
                    let mut acc = accumulator.lock().expect("table accumulator poisoned");
                    *acc = &*acc * &partial % &self.modulus;
                });
            }
        });
        Ok(accumulator
            .into_inner()
            .expect("table accumulator poisoned"))
    }

    /// Base-`2^b` digits of `x`, least significant first.
    fn digits(&self, x: &BigUint) -> Vec<usize> {
        x.to_bytes_le()
            .chunks(self.chunk_bytes)
            .map(|chunk| {
                let mut digit = 0usize;
                for (idx, byte) in chunk.iter().enumerate() {
                    digit |= (*byte as usize) << (8 * idx);
                }
                digit
            })
            .collect()
    }

    /// Product of the table entries selected by `shard`, whose first digit
    /// has global index `offset`.
    fn shard_product(&self, shard: &[usize], offset: usize) -> BigUint {
        let mut product = BigUint::one();
        for (local, &digit) in shard.iter().enumerate() {
            if digit == 0 {
                continue;
            }
            product = product * &self.rows[offset + local][digit] % &self.modulus;
        }
        product % &self.modulus
    }
}
