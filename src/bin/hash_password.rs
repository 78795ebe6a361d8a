//! Prints the argon2 hash to put into `APP_ADMIN_PASSWORD_HASH`.

use std::env;

use evcare_leads::auth::hash_password;

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let Some(password) = env::args().nth(1) else {
        eprintln!("usage: hash_password <password>");
        std::process::exit(2);
    };

    match hash_password(&password) {
        Ok(hash) => println!("{hash}"),
        Err(err) => {
            log::error!("Error hashing password: {err}");
            std::process::exit(1);
        }
    }
}
