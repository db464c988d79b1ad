//! Demonstrates that `SimpleVec` works with element types that can be moved but not cloned,
//! and that moving a vector transfers its storage without touching the elements.

use std::mem;

use simple_vec::SimpleVec;

/// An element type without `Clone` or `Copy`.
#[derive(Debug)]
struct Ticket {
    number: u32,
}

fn main() -> Result<(), simple_vec::Error> {
    let mut queue = SimpleVec::new();

    for number in 1..=4 {
        queue.push(Ticket { number })?;
    }

    queue.insert(0, Ticket { number: 0 })?;
    println!("Queue: {queue:?}");

    let storage = queue.as_ptr();

    // Taking the vector leaves an empty one behind and keeps the storage where it was.
    let moved = mem::take(&mut queue);
    println!(
        "Moved {} tickets, storage reused: {}; source now holds {} with capacity {}",
        moved.len(),
        moved.as_ptr() == storage,
        queue.len(),
        queue.capacity()
    );

    // Owning iteration moves each ticket out of the vector.
    for ticket in moved {
        println!("Serving ticket {}", ticket.number);
    }

    Ok(())
}
