//! Bulk-append demonstration: fill an array, optionally shuffle and sort it,
//! then binary-search it.

use anyhow::{Context, Result, bail};
use dyn_array::{DynamicArray, SortOrder};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

/// Selection sort is quadratic, so shuffled runs are capped.
pub const MAX_SHUFFLE_COUNT: usize = 20_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    pub count: usize,
    pub needles: Vec<i32>,
    pub shuffle: bool,
    pub seed: u64,
    pub print: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            count: 100_000,
            needles: vec![255],
            shuffle: false,
            seed: 0,
            print: false,
        }
    }
}

impl DemoConfig {
    pub fn validate(&self) -> Result<()> {
        if i32::try_from(self.count).is_err() {
            bail!("count {} does not fit in an i32 element", self.count);
        }
        if self.shuffle && self.count > MAX_SHUFFLE_COUNT {
            bail!(
                "--shuffle sorts with an O(n^2) selection sort; count must be at most {}, got {}",
                MAX_SHUFFLE_COUNT,
                self.count
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub needle: i32,
    pub index: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoReport {
    pub len: usize,
    pub capacity: usize,
    pub searches: Vec<SearchOutcome>,
}

/// Run the demonstration and release the array before returning.
pub fn run(config: &DemoConfig) -> Result<DemoReport> {
    config.validate()?;

    let mut values: Vec<i32> = (0..config.count as i32).collect();
    if config.shuffle {
        let mut rng = StdRng::seed_from_u64(config.seed);
        values.shuffle(&mut rng);
        debug!(seed = config.seed, "values shuffled");
    }

    let mut numbers = DynamicArray::new().context("Failed to allocate array")?;
    for &val in &values {
        numbers
            .push_back(val)
            .with_context(|| format!("Failed to push {}", val))?;
    }
    info!(len = numbers.len(), capacity = numbers.capacity(), "array filled");

    if config.shuffle {
        numbers.sort(SortOrder::Ascending);
        debug!("array sorted");
    }

    let searches = config
        .needles
        .iter()
        .map(|&needle| {
            let index = numbers.bsearch(needle);
            info!(needle, ?index, "bsearch");
            SearchOutcome { needle, index }
        })
        .collect();

    if config.print {
        numbers.print();
    }

    let report = DemoReport {
        len: numbers.len(),
        capacity: numbers.capacity(),
        searches,
    };
    drop(numbers);
    debug!("array released");
    Ok(report)
}
