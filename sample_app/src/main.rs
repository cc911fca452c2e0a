use anyhow::{Context, Result};
use dyn_array::DynamicArray;

fn main() -> Result<()> {
    println!("Initializing DynamicArray...");
    let mut numbers = DynamicArray::new().context("Failed to allocate array")?;

    println!("Pushing elements...");
    for i in 0..100_000 {
        numbers.push_back(i).with_context(|| format!("Failed to push {}", i))?;
    }
    assert_eq!(numbers.len(), 100_000);
    println!("len: {}, cap: {}", numbers.len(), numbers.capacity());

    match numbers.bsearch(255) {
        Some(_) => println!("yes"),
        None => println!("no"),
    }
    assert_eq!(numbers.bsearch(255), Some(255));
    assert_eq!(numbers.bsearch(100_000), None);

    drop(numbers);
    println!("Array released.");
    Ok(())
}
