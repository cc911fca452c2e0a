use clap::Parser;

use crate::demo::DemoConfig;

#[derive(Parser, Debug)]
#[command(name = "arraylist")]
#[command(version, about = "Fill a dynamic integer array and search it", long_about = None)]
pub struct Cli {
    /// Number of sequential integers to append
    #[arg(short = 'n', long, default_value_t = 100_000)]
    pub count: usize,

    /// Value to binary-search for (repeatable)
    #[arg(long = "needle", value_name = "VALUE", default_values_t = [255], allow_negative_numbers = true)]
    pub needles: Vec<i32>,

    /// Append the values in shuffled order, then selection-sort before searching
    #[arg(long)]
    pub shuffle: bool,

    /// Seed for --shuffle
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Print the final array
    #[arg(short, long)]
    pub print: bool,

    /// Set verbose level
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn demo_config(&self) -> DemoConfig {
        DemoConfig {
            count: self.count,
            needles: self.needles.clone(),
            shuffle: self.shuffle,
            seed: self.seed,
            print: self.print,
        }
    }
}
