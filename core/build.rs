use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();

    generate_item_table(&out_dir);

    println!("cargo:rerun-if-changed=data/items.csv");
}

fn generate_item_table(out_dir: &str) {
    let csv = fs::read_to_string("data/items.csv").expect("failed to read items.csv");

    // Sorted by numeric id for deterministic output; first row for an id wins
    let mut entries: BTreeMap<u32, String> = BTreeMap::new();
    for line in csv.lines().skip(1) {
        let fields: Vec<&str> = line.splitn(3, ',').collect();
        if fields.len() < 3 {
            continue;
        }
        let Ok(id) = fields[0].trim().parse::<u32>() else {
            continue;
        };
        let name = fields[1].trim();
        let space = fields[2].trim() == "1";
        entries
            .entry(id)
            .or_insert_with(|| format!("({:?}, {})", name, space));
    }
    let keys: Vec<String> = entries.keys().map(u32::to_string).collect();

    let path = Path::new(out_dir).join("builtin_items.rs");
    let mut file = BufWriter::new(fs::File::create(&path).unwrap());

    let mut builder = phf_codegen::Map::<&str>::new();
    for (key, info) in keys.iter().zip(entries.values()) {
        builder.entry(key.as_str(), info);
    }

    writeln!(
        file,
        "pub static BUILTIN_ITEMS: phf::Map<&'static str, (&'static str, bool)> = {};",
        builder.build()
    )
    .unwrap();
}
