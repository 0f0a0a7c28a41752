use hochschulkompass::prelude::{ClientConfig, Result, SearchClient, SearchFilters, StudyType};

#[tokio::main]
async fn main() -> Result<()> {
    let client = SearchClient::new(ClientConfig::default());

    // Full-time design programs in media informatics, undergraduate or postgraduate
    let filters = SearchFilters::builder()
        .fach("Design")
        .study_type(StudyType::Both)
        .studienformen(["v"])
        .sachgebiete(["S230"])
        .build();

    let programs = client.search(&filters).await?;

    for program in &programs {
        println!(
            "{} - {} - {}",
            program.title,
            program.institution().unwrap_or("-"),
            program.detail_url.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}
