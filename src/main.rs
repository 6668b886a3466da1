use std::{env, error::Error, process};

use qrforge::{ECLevel, QRBuilder};

const USAGE: &str = "Usage: qrforge <text> [L|M|Q|H] [out.png]";

fn parse_ec_level(s: &str) -> Option<ECLevel> {
    match s.to_ascii_uppercase().as_str() {
        "L" => Some(ECLevel::L),
        "M" => Some(ECLevel::M),
        "Q" => Some(ECLevel::Q),
        "H" => Some(ECLevel::H),
        _ => None,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = env::args().skip(1).collect::<Vec<_>>();
    let Some(data) = args.first() else {
        eprintln!("{USAGE}");
        process::exit(2);
    };

    let ecl = match args.get(1) {
        Some(s) => match parse_ec_level(s) {
            Some(ecl) => ecl,
            None => {
                eprintln!("Unknown error correction level {s:?}\n{USAGE}");
                process::exit(2);
            }
        },
        None => ECLevel::M,
    };

    let qr = QRBuilder::new(data).ec_level(ecl).build()?;

    match args.get(2) {
        Some(path) => {
            qr.to_image(4).save(path)?;
            println!("Saved QR {} to {path}", qr.metadata());
        }
        None => println!("{}", qr.to_str(1)),
    }

    Ok(())
}
