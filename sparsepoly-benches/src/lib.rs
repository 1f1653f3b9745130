//! Criterion benchmarks for `sparsepoly`, see `benches/`.
