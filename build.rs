use std::env;

fn main() {
    // Base address of the sentinel/score region (optional)
    // Falls back to the library default when unset or unparsable
    if let Ok(base) = env::var("EEPROM_SENTINEL_BASE") {
        println!("cargo:rustc-env=EEPROM_SENTINEL_BASE={}", base);
        println!(
            "cargo:warning=Using EEPROM_SENTINEL_BASE from environment: {}",
            base
        );
    } else {
        println!("cargo:rustc-env=EEPROM_SENTINEL_BASE=");
    }

    println!("cargo:rerun-if-env-changed=EEPROM_SENTINEL_BASE");
}
