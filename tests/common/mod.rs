//! Common test utilities for iteration sampler integration tests.

#![allow(dead_code)]

use iteration_sampler::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Header used by generated simulation output tables
pub const HEADER: &str = "event→iterations;individual;fitness;genotype";

/// Content of a simulation output table with `num_rows` data rows.
///
/// Column `individual` holds the row position so tests can tell which rows
/// survived.
pub fn simulation_output(num_rows: usize, population_size: usize) -> String {
    let mut content = format!("{}\n", HEADER);
    for i in 0..num_rows {
        content.push_str(&format!(
            "{};{};{:.3};{}|{}\n",
            i / population_size + 1,
            i,
            1.0 / (i + 1) as f64,
            i % 7,
            i % 3
        ));
    }
    content
}

/// Write a generated table into `dir` and return its path
pub fn write_output(dir: &Path, name: &str, num_rows: usize, population_size: usize) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, simulation_output(num_rows, population_size)).unwrap();
    path
}

/// Values of the `individual` column, in file order
pub fn surviving_rows(path: &Path) -> Vec<usize> {
    let table = CsvTableIo::new().read(path).unwrap();
    let column = table.column_index("individual").unwrap();
    table
        .rows()
        .iter()
        .map(|row| row[column].parse().unwrap())
        .collect()
}

/// Configuration rooted at `dir`
pub fn config_for(dir: &Path, evolver: &str, population_size: usize) -> SamplerConfig {
    ConfigBuilder::new()
        .root_dir(dir)
        .evolver(evolver)
        .population_size(population_size)
        .build()
        .unwrap()
}
