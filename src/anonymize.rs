use crate::error::Error;
use crate::model::{Match, Results};
use ahash::{AHashMap, AHashSet};
use std::collections::BTreeSet;
use tracing::debug;

/// Source of pseudonyms. Implementations must return exactly `count`
/// distinct names.
pub trait NameGenerator {
    fn generate(&mut self, count: usize) -> Result<Vec<String>, Error>;
}

const WORDS: &[&str] = &[
    "acorn", "amber", "anchor", "apple", "arrow", "aspen", "badger", "basil", "beacon", "birch",
    "bison", "bramble", "breeze", "brook", "cactus", "canyon", "cedar", "cinder", "clover",
    "cobalt", "comet", "coral", "cricket", "crystal", "cypress", "dahlia", "delta", "dune",
    "ember", "falcon", "fern", "fjord", "flint", "fox", "galaxy", "garnet", "geyser", "ginger",
    "glacier", "granite", "harbor", "hazel", "heron", "hickory", "indigo", "iris", "ivy",
    "jade", "jasper", "juniper", "kestrel", "kiwi", "lagoon", "lantern", "larch", "lava",
    "lemon", "lichen", "lotus", "lynx", "magnet", "maple", "marble", "meadow", "mesa", "mint",
    "moss", "nectar", "nutmeg", "oak", "onyx", "orchid", "otter", "pebble", "pepper", "pine",
    "plum", "prairie", "quartz", "quill", "raven", "reef", "ridge", "river", "saffron", "sage",
    "sequoia", "shale", "sparrow", "spruce", "summit", "thistle", "thunder", "tulip", "tundra",
    "velvet", "violet", "walnut", "willow", "wren", "yarrow", "zephyr",
];

/// Picks distinct words from a built-in list in random order. Once the list
/// runs out, words are reused with a numeric suffix.
#[derive(Debug, Default)]
pub struct WordNameGenerator;

impl WordNameGenerator {
    pub fn new() -> Self {
        Self
    }
}

fn random_u64() -> Result<u64, Error> {
    let mut bytes = [0u8; 8];
    getrandom::getrandom(&mut bytes)
        .map_err(|e| Error::Anonymize(format!("getrandom: {:?}", e)))?;
    Ok(u64::from_le_bytes(bytes))
}

impl NameGenerator for WordNameGenerator {
    fn generate(&mut self, count: usize) -> Result<Vec<String>, Error> {
        let mut words: Vec<&str> = WORDS.to_vec();
        for i in (1..words.len()).rev() {
            let j = (random_u64()? % (i as u64 + 1)) as usize;
            words.swap(i, j);
        }

        Ok((0..count)
            .map(|i| {
                let word = words[i % words.len()];
                match i / words.len() {
                    0 => word.to_string(),
                    round => format!("{}{}", word, round + 1),
                }
            })
            .collect())
    }
}

/// Build a one-to-one mapping from every name in `names` to a pseudonym.
pub fn name_mapping<'a, I>(
    names: I,
    generator: &mut dyn NameGenerator,
) -> Result<AHashMap<String, String>, Error>
where
    I: IntoIterator<Item = &'a str>,
{
    let originals: BTreeSet<&str> = names.into_iter().collect();
    let replacements = generator.generate(originals.len())?;

    if replacements.len() != originals.len() {
        return Err(Error::Anonymize(format!(
            "requested {} names, generator returned {}",
            originals.len(),
            replacements.len()
        )));
    }
    let distinct: AHashSet<&String> = replacements.iter().collect();
    if distinct.len() != replacements.len() {
        return Err(Error::Anonymize(
            "generator returned duplicate names".to_string(),
        ));
    }

    debug!("Anonymizing {} distinct names", originals.len());
    Ok(originals
        .into_iter()
        .map(str::to_string)
        .zip(replacements)
        .collect())
}

fn rename(matches: &mut [Match], mapping: &AHashMap<String, String>) {
    for m in matches {
        if let Some(name) = mapping.get(&m.first.name) {
            m.first.name = name.clone();
        }
        if let Some(name) = mapping.get(&m.second.name) {
            m.second.name = name.clone();
        }
    }
}

/// Replace every file name in `matches` with a pseudonym.
pub fn anonymize(matches: &mut [Match], generator: &mut dyn NameGenerator) -> Result<(), Error> {
    let mapping = name_mapping(
        matches
            .iter()
            .flat_map(|m| [m.first.name.as_str(), m.second.name.as_str()]),
        generator,
    )?;
    rename(matches, &mapping);
    Ok(())
}

/// Anonymize several result sets with one shared mapping, so a submission
/// keeps the same pseudonym in every graph and in the report.
pub fn anonymize_results(
    results: &mut [Results],
    generator: &mut dyn NameGenerator,
) -> Result<(), Error> {
    let mapping = name_mapping(
        results
            .iter()
            .flat_map(|r| r.matches.iter())
            .flat_map(|m| [m.first.name.as_str(), m.second.name.as_str()]),
        generator,
    )?;
    for res in results.iter_mut() {
        rename(&mut res.matches, &mapping);
    }
    Ok(())
}
