//! Identity resolution: turn free text into a Composer or Instrument.
//!
//! The load-existing / build-manually / persist-new decision tree has the
//! same shape for both kinds, so it is implemented once and parameterized by
//! a kind strategy: the match predicate differs (substring containment for
//! composers, exact canonical-key equality for instruments after the numeral
//! token is stripped) and so does the manual-creation field sequence.

use crate::error::SessionResult;
use crate::models::{Composer, Instrument};
use crate::names::{abbreviate_name, display_name, mutopia_name_guess, normalize_name, split_number};
use crate::prompt::{self, Prompter};
use crate::registry::{Kind, Registry};

/// Kind-specific half of the resolution workflow.
trait ResolveStrategy {
    type Entity;

    fn kind(&self) -> Kind;

    /// Registry keys the typed text matches, in registry order.
    fn matches(&self, keys: &[String]) -> Vec<String>;

    /// Deserialize a chosen registry entry into an entity.
    fn load(&self, registry: &Registry, key: &str) -> Option<Self::Entity>;

    /// Fall back to building the entity from prompt input.
    fn create_manually<P: Prompter>(&self, prompt: &mut P) -> SessionResult<Self::Entity>;

    /// Offer to persist a manually created entity.
    fn offer_persist<P: Prompter>(
        &self,
        prompt: &mut P,
        registry: &mut Registry,
        entity: &Self::Entity,
    ) -> SessionResult<()>;
}

/// Resolve free text typed for a composer.
pub fn resolve_composer<P: Prompter>(
    prompt: &mut P,
    registry: &mut Registry,
    input: &str,
) -> SessionResult<Composer> {
    resolve(&ComposerStrategy { input }, prompt, registry)
}

/// Resolve free text typed for an instrument. A standalone numeral token in
/// the text becomes the numeric disambiguator and is not part of the lookup.
pub fn resolve_instrument<P: Prompter>(
    prompt: &mut P,
    registry: &mut Registry,
    input: &str,
) -> SessionResult<Instrument> {
    let (name, number) = split_number(input);
    resolve(&InstrumentStrategy { name, number }, prompt, registry)
}

fn resolve<S: ResolveStrategy, P: Prompter>(
    strategy: &S,
    prompt: &mut P,
    registry: &mut Registry,
) -> SessionResult<S::Entity> {
    let keys = registry.list_keys(strategy.kind());
    let matches = strategy.matches(&keys);
    if let Some(key) = pick_match(prompt, &matches)? {
        if let Some(entity) = strategy.load(registry, &key) {
            return Ok(entity);
        }
    }
    let entity = strategy.create_manually(prompt)?;
    strategy.offer_persist(prompt, registry, &entity)?;
    Ok(entity)
}

/// Choose among the matched keys.
///
/// Zero matches declines immediately; one match asks for confirmation; more
/// enumerate with 0-based indices in registry order, where blank input
/// declines and falls through to manual creation.
fn pick_match<P: Prompter>(prompt: &mut P, matches: &[String]) -> SessionResult<Option<String>> {
    match matches {
        [] => Ok(None),
        [only] => {
            let load = prompt::confirm(
                prompt,
                &format!("{} is in the database, would you like to load it?", display_name(only)),
                true,
            )?;
            Ok(load.then(|| only.clone()))
        }
        _ => {
            for (idx, key) in matches.iter().enumerate() {
                prompt.show(&format!("{idx}: {}", display_name(key)));
            }
            let choice = prompt::index(
                prompt,
                "Enter the number of the entry to load or press enter to create a new one: ",
                matches.len() - 1,
                true,
            )?;
            Ok(choice.map(|idx| matches[idx].clone()))
        }
    }
}

// =============================================================================
// Composer strategy
// =============================================================================

struct ComposerStrategy<'a> {
    input: &'a str,
}

impl ResolveStrategy for ComposerStrategy<'_> {
    type Entity = Composer;

    fn kind(&self) -> Kind {
        Kind::Composer
    }

    fn matches(&self, keys: &[String]) -> Vec<String> {
        let needle = normalize_name(self.input);
        if needle.is_empty() {
            return Vec::new();
        }
        keys.iter().filter(|key| key.contains(&needle)).cloned().collect()
    }

    fn load(&self, registry: &Registry, key: &str) -> Option<Composer> {
        registry.composer(key)
    }

    fn create_manually<P: Prompter>(&self, prompt: &mut P) -> SessionResult<Composer> {
        let mut composer = Composer::new(self.input.trim());
        let short_default = abbreviate_name(&composer.name);
        let short = prompt::with_default(
            prompt,
            &format!("Short name [{short_default}]: "),
            &short_default,
        )?;
        let pub_default = mutopia_name_guess(&composer.name);
        let publication = prompt::with_default(
            prompt,
            &format!("Publication name [{pub_default}]: "),
            &pub_default,
        )?;
        composer.shortname = Some(short);
        composer.mutopianame = Some(publication);
        Ok(composer)
    }

    fn offer_persist<P: Prompter>(
        &self,
        prompt: &mut P,
        registry: &mut Registry,
        composer: &Composer,
    ) -> SessionResult<()> {
        let save = prompt::confirm(
            prompt,
            &format!("Add {} to the database for future use?", composer.name),
            true,
        )?;
        if save {
            registry.save_composer(composer)?;
        }
        Ok(())
    }
}

// =============================================================================
// Instrument strategy
// =============================================================================

struct InstrumentStrategy {
    name: String,
    number: Option<u32>,
}

impl ResolveStrategy for InstrumentStrategy {
    type Entity = Instrument;

    fn kind(&self) -> Kind {
        Kind::Instrument
    }

    fn matches(&self, keys: &[String]) -> Vec<String> {
        // Instrument names must match their canonical family exactly; the
        // numeral was already parsed out.
        let needle = normalize_name(&self.name);
        keys.iter().filter(|key| **key == needle).cloned().collect()
    }

    fn load(&self, registry: &Registry, key: &str) -> Option<Instrument> {
        let mut instrument = registry.instrument(key)?;
        instrument.number = self.number;
        Some(instrument)
    }

    fn create_manually<P: Prompter>(&self, prompt: &mut P) -> SessionResult<Instrument> {
        prompt.show("Please enter instrument information (press enter to leave a field unset).");
        let mut instrument = Instrument::new(&self.name);
        instrument.number = self.number;
        instrument.abbr = prompt::optional(prompt, "Abbreviation: ")?;
        loop {
            let clef = prompt::optional(prompt, "Clef: ")?;
            match instrument.set_clef(clef) {
                Ok(()) => break,
                Err(_) => prompt.show(&format!(
                    "Invalid clef. Valid clefs: {}.",
                    crate::mutopia::VALID_CLEFS.join(", ")
                )),
            }
        }
        instrument.transposition = prompt::optional(prompt, "Transposition: ")?;
        instrument.keyboard =
            prompt::confirm(prompt, "Is it a keyboard (grand staff) instrument?", false)?;
        instrument.midi =
            prompt::optional(prompt, "Midi instrument name: ")?.map(|m| m.to_lowercase());
        instrument.family =
            prompt::optional(prompt, "Instrument family: ")?.map(|f| normalize_name(&f));
        Ok(instrument)
    }

    fn offer_persist<P: Prompter>(
        &self,
        prompt: &mut P,
        registry: &mut Registry,
        instrument: &Instrument,
    ) -> SessionResult<()> {
        let save = prompt::confirm(
            prompt,
            "Would you like to add this instrument to the database for easy use next time?",
            true,
        )?;
        if save {
            registry.save_instrument(instrument)?;
        }
        Ok(())
    }
}
