use containerkit::identity::Identify;
use containerkit::policy::lru::LruCache;
use containerkit::traits::IdCache;

#[derive(Debug, Clone)]
struct Car {
    name: String,
    colour: String,
    horsepower: u32,
}

impl Identify for Car {
    fn identifier(&self) -> Option<String> {
        Some(self.name.clone())
    }
}

fn main() {
    let numbers: LruCache<String> = LruCache::new(10);
    for i in 1..=10 {
        let id = i.to_string();
        if let Err(err) = numbers.add_by_id(id.clone(), id) {
            eprintln!("ERROR: {err}");
        }
    }

    numbers.add_by_id("5", "5".to_string()).ok();
    println!("After touching 5: {numbers}");

    numbers.add_by_id("11", "11".to_string()).ok();
    println!("After adding 11: {numbers}");

    let cars: LruCache<Car> = LruCache::new(2);
    for (name, colour, horsepower) in [("beetle", "yellow", 50), ("mini", "red", 90)] {
        let car = Car {
            name: name.into(),
            colour: colour.into(),
            horsepower,
        };
        match cars.add(car) {
            Ok(id) => println!("added car id={id}"),
            Err(err) => eprintln!("ERROR: {err}"),
        }
    }

    if let Some(car) = cars.get("beetle") {
        println!("{} is {} with {} hp", car.name, car.colour, car.horsepower);
    }
}

// Expected output:
// After touching 5: [1,2,3,4,6,7,8,9,10,5]
// After adding 11: [2,3,4,6,7,8,9,10,5,11]
// added car id=beetle
// added car id=mini
// beetle is yellow with 50 hp
