use containerkit::ds::stack::BoundedStack;
use containerkit::traits::ReadOnlyContainer;

fn main() {
    let words: BoundedStack<String> = BoundedStack::new(0);

    for word in ["Hello", "World"] {
        if let Err(err) = words.push(word.to_string()) {
            eprintln!("ERROR: {err}");
        }
    }

    println!("Length: {}", words.len());
    println!("Content: {words}");

    let top = match words.pop() {
        Ok(value) => value,
        Err(err) => {
            eprintln!("ERROR: {err}");
            return;
        },
    };
    println!("Pop: {top}");
    println!("Content: {words}");

    if let Err(err) = words.push_all([top.clone(), top]) {
        eprintln!("ERROR: {err}");
    }
    println!("Content: {words}");

    if let Err(err) = words.discard() {
        eprintln!("ERROR: {err}");
    }
    println!("Content: {words}");

    let bounded: BoundedStack<i32> = BoundedStack::new(2);
    bounded.push_all([13, 42]).ok();
    if let Err(err) = bounded.push(7) {
        eprintln!("ERROR: {err}");
    }
    println!("Bounded: {bounded}");
}

// Expected output:
// Length: 2
// Content: [Hello,World]
// Pop: World
// Content: [Hello]
// Content: [Hello,World,World]
// Content: [Hello,World]
// Bounded: [13,42]
//
// stderr: ERROR: Overflow error
