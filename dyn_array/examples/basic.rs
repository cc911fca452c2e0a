use dyn_array::{DynamicArray, SortOrder};

fn main() -> dyn_array::Result<()> {
    println!("--- Basic Usage Example ---");
    let mut arr = DynamicArray::new()?;

    for i in [5, 3, 1, 4, 2] {
        arr.push_back(i * 10)?;
        println!("Pushed: {}, len: {}, cap: {}", i * 10, arr.len(), arr.capacity());
    }

    arr.sort(SortOrder::Ascending);
    println!("Sorted: {arr}");
    println!("bsearch(40) = {:?}", arr.bsearch(40));

    arr.insert(0, -10)?;
    arr.erase(arr.len() - 1)?;
    println!("After insert/erase: {arr}");

    arr.shrink_to_fit()?;
    println!("Shrunk: len: {}, cap: {}", arr.len(), arr.capacity());

    while let Ok(val) = arr.pop() {
        println!("Popped: {}, len: {}", val, arr.len());
    }
    Ok(())
}
