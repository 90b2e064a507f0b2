fn main() -> anyhow::Result<()> {
    promo_traffic::cli::run()?;
    Ok(())
}
