//! Basic usage of the `simple_vec` crate:
//!
//! * Creating a vector.
//! * Appending items and watching the capacity grow.
//! * Inserting and erasing items at arbitrary positions.
//! * Checked and unchecked access.

use simple_vec::{SimpleVec, simple_vec};

fn main() -> Result<(), simple_vec::Error> {
    let mut names = SimpleVec::<String>::new();

    // Appending items doubles the capacity whenever the vector is full.
    for name in ["Alice", "Bob", "Charlie", "Dave", "Eve"] {
        names.push(name.to_string())?;

        println!(
            "Pushed {name}: vector contains {} items, with a capacity of {}",
            names.len(),
            names.capacity()
        );
    }

    // Inserting shifts the following items one slot towards the end.
    let position = names.insert(1, "Zoe".to_string())?;
    println!("Inserted {} at position {position}", names[position]);

    // Erasing shifts the following items back and returns the position of the item that took
    // the place of the erased one.
    let next = names.erase(0);
    println!("After erasing the first item, {} is at position {next}", names[next]);

    // Checked access reports out of range positions as errors.
    match names.at(100) {
        Ok(name) => println!("Unexpectedly found {name}"),
        Err(error) => println!("Checked access failed: {error}"),
    }

    // Vectors compare lexicographically, element by element.
    let numbers = simple_vec![1, 2, 3];
    println!(
        "{numbers:?} < {:?} is {}",
        simple_vec![1, 2, 4],
        numbers < simple_vec![1, 2, 4]
    );

    // Removing items from the end never releases storage.
    names.clear();
    println!(
        "After clearing: {} items, capacity still {}",
        names.len(),
        names.capacity()
    );

    Ok(())
}
