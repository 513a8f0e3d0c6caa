mod app;
mod config;
mod error;
mod library;
mod metadata;
mod runtime;
mod store;

#[cfg(test)]
mod test_support;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
