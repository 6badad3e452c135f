// Infrastructure layer module (storage adapters)

pub mod repositories;
