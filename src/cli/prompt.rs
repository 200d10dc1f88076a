use dialoguer::{Confirm, MultiSelect, Select, theme::ColorfulTheme};

use crate::{
    catalog::{ArtistSelector, InclusionPolicy, ReleaseCandidate},
    error::CatalogError,
    types::Artist,
};

fn artist_label(artist: &Artist) -> String {
    format!("{} ({})", artist.name, artist.external_urls.spotify)
}

fn release_label(release: &ReleaseCandidate) -> String {
    format!(
        "{} [{}, {}] ({})",
        release.name, release.album_type, release.release_date, release.url
    )
}

/// Asks the user which impure releases to keep, all at once.
#[derive(Default)]
pub struct PromptPolicy {
    theme: ColorfulTheme,
}

impl InclusionPolicy for PromptPolicy {
    fn include(&mut self, impure: &[&ReleaseCandidate]) -> Result<Vec<bool>, CatalogError> {
        let labels: Vec<String> = impure.iter().map(|r| release_label(r)).collect();

        let chosen = MultiSelect::with_theme(&self.theme)
            .with_prompt(
                "These releases do not seem to be pure, please select the ones you want to include",
            )
            .items(&labels)
            .interact()
            .map_err(|e| CatalogError::Prompt(e.to_string()))?;

        let mut decisions = vec![false; impure.len()];
        for index in chosen {
            if let Some(decision) = decisions.get_mut(index) {
                *decision = true;
            }
        }
        Ok(decisions)
    }
}

/// Confirms or picks the target artist interactively.
#[derive(Default)]
pub struct PromptSelector {
    theme: ColorfulTheme,
}

impl ArtistSelector for PromptSelector {
    fn confirm(&mut self, artist: &Artist) -> Result<bool, CatalogError> {
        Confirm::with_theme(&self.theme)
            .with_prompt(format!(
                "Is '{}' the artist you are looking for?",
                artist_label(artist)
            ))
            .default(true)
            .interact()
            .map_err(|e| CatalogError::Prompt(e.to_string()))
    }

    fn choose(&mut self, artists: &[Artist]) -> Result<Option<usize>, CatalogError> {
        let labels: Vec<String> = artists.iter().map(artist_label).collect();

        Select::with_theme(&self.theme)
            .with_prompt("Which artist?")
            .items(&labels)
            .default(0)
            .interact_opt()
            .map_err(|e| CatalogError::Prompt(e.to_string()))
    }
}
