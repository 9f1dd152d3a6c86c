/// Portfolio document loaded through the asset server at startup.
pub const PORTFOLIO_ASSET_PATH: &str = "portfolio.json";
