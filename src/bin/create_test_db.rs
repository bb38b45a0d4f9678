use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use store_directory::{
    Category, ContactMethod, MethodFlags, StoreDetails, StoreName, create_store, initialize_db,
};

/// A utility for creating a sample database for the store directory server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    if output_path.extension().is_none_or(|extension| extension.is_empty()) {
        eprintln!("Output path must include a file extension (e.g., 'stores.db').");
        exit(1);
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    let stores = sample_stores();
    println!("Adding {} sample stores...", stores.len());

    for details in stores {
        create_store(details, &conn)?;
    }

    println!("Success!");

    Ok(())
}

struct Sample {
    name: &'static str,
    category: Category,
    store_type: &'static str,
    description: &'static str,
    primary_method: ContactMethod,
    methods: &'static [ContactMethod],
    delivery: bool,
    pickup: bool,
}

const SAMPLES: [Sample; 7] = [
    Sample {
        name: "Bread & Butter Bakery",
        category: Category::Groceries,
        store_type: "bakery",
        description: "Sourdough, croissants and seasonal pies.",
        primary_method: ContactMethod::Online,
        methods: &[ContactMethod::Online, ContactMethod::Phone],
        delivery: false,
        pickup: true,
    },
    Sample {
        name: "Green Acres Produce",
        category: Category::Groceries,
        store_type: "produce",
        description: "Weekly boxes of fruit and vegetables from local farms.",
        primary_method: ContactMethod::Form,
        methods: &[ContactMethod::Form, ContactMethod::Email],
        delivery: true,
        pickup: true,
    },
    Sample {
        name: "Joe's Deli",
        category: Category::Groceries,
        store_type: "deli",
        description: "Cured meats, cheese and sandwiches.",
        primary_method: ContactMethod::Phone,
        methods: &[ContactMethod::Phone],
        delivery: true,
        pickup: false,
    },
    Sample {
        name: "Hop Along Brewing",
        category: Category::Alcohol,
        store_type: "beer",
        description: "Craft beer in cans and growlers.",
        primary_method: ContactMethod::Online,
        methods: &[ContactMethod::Online],
        delivery: true,
        pickup: true,
    },
    Sample {
        name: "Vineyard Cellars",
        category: Category::Alcohol,
        store_type: "wine",
        description: "Red, white and sparkling wines from the valley.",
        primary_method: ContactMethod::Email,
        methods: &[ContactMethod::Email, ContactMethod::Phone],
        delivery: false,
        pickup: true,
    },
    Sample {
        name: "Spice Route",
        category: Category::Restaurants,
        store_type: "indian",
        description: "Curries, biryani and fresh naan.",
        primary_method: ContactMethod::Phone,
        methods: &[ContactMethod::Phone, ContactMethod::Online],
        delivery: true,
        pickup: true,
    },
    Sample {
        name: "Trattoria Nonna",
        category: Category::Restaurants,
        store_type: "italian",
        description: "Family-style pasta and wood-fired pizza.",
        primary_method: ContactMethod::Online,
        methods: &[ContactMethod::Online],
        delivery: false,
        pickup: true,
    },
];

fn sample_stores() -> Vec<StoreDetails> {
    SAMPLES
        .iter()
        .enumerate()
        .map(|(index, sample)| {
            let slug = sample
                .name
                .to_lowercase()
                .split(|c: char| !c.is_ascii_alphanumeric())
                .filter(|word| !word.is_empty())
                .collect::<Vec<_>>()
                .join("-");
            let uses = |method| sample.methods.contains(&method);

            StoreDetails {
                name: StoreName::new_unchecked(sample.name),
                category: sample.category,
                store_type: sample.store_type.to_owned(),
                description: Some(sample.description.to_owned()),
                url: format!("https://{slug}.example.com"),
                primary_method: sample.primary_method,
                methods: MethodFlags::from_selected(sample.methods),
                email: uses(ContactMethod::Email).then(|| format!("orders@{slug}.example.com")),
                phone: uses(ContactMethod::Phone).then(|| format!("613-555-01{index:02}")),
                delivery: sample.delivery,
                pickup: sample.pickup,
                image: None,
                inverted_image: false,
            }
        })
        .collect()
}
