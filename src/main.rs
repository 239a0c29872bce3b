mod audio;
mod config;
mod error;
mod library;
mod mpris;
mod player;
mod playlist;
mod runtime;
mod ui;

#[cfg(test)]
mod testing;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
