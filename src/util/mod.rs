pub mod static_assets;
