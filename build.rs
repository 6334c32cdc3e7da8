use std::env;
use std::fs;
use std::path::Path;

// Las variables de .env se inyectan como rustc-env para que option_env!()
// las vea en config.rs. Lo que ya esté definido en el entorno tiene prioridad.
fn main() {
    let env_file = Path::new(".env");

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env.example");

    if !env_file.exists() {
        println!("cargo:warning=Sin .env: se usan los valores por defecto (ver .env.example)");
        return;
    }

    println!("cargo:rerun-if-changed=.env");

    let contents = match fs::read_to_string(env_file) {
        Ok(contents) => contents,
        Err(e) => {
            println!("cargo:warning=No se pudo leer .env: {}", e);
            return;
        }
    };

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            if env::var(key).is_err() {
                println!("cargo:rustc-env={}={}", key, value);
            }
        }
    }
}
