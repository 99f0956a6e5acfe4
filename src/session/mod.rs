//! The interactive editing session.
//!
//! A hub-and-spoke state machine over the in-memory [`Piece`]: the main menu
//! dispatches into modal sub-editors (headers, mutopia headers, instruments,
//! ensembles, movements), each a small command loop that reads a line,
//! matches its leading characters case-insensitively, and re-prompts on
//! anything unrecognized. Nothing touches durable storage except the quit
//! flow, which offers one save before exiting.

use std::io;
use std::path::PathBuf;

use crate::collection::{self, Labeled};
use crate::config;
use crate::error::SessionResult;
use crate::models::{Ensemble, Headers, Movement, MutopiaHeaders, Piece};
use crate::mutopia::{LICENSES, STYLES};
use crate::prompt::{self, Prompter};
use crate::registry::Registry;
use crate::resolve::{resolve_composer, resolve_instrument};

const INVALID: &str = "Command not recognized. Please try again.";

const MAIN_HELP: &str = "\
You can now add score information. Available modes are:
  header:     add title, composer, etc.
  instrument: add/remove/re-order individual instruments in the score
  ensemble:   add an ensemble's instruments to the score
  movement:   add/remove movements (including time, key and tempo info)
  print:      show the current piece
  quit:       offer to save, then exit
  help:       print this message";

const HEADER_HELP: &str = "\
You may edit any of the following headers:
  title        composer
  dedication   subtitle
  subsubtitle  poet
  meter        arranger
  tagline      copyright
Enter \"mutopia\" to edit publication headers, or \"done\" to finish.";

const MUTOPIA_HELP: &str = "\
You may enter any of the following fields or change source, style or
license:
  maintainer     maintainerEmail
  maintainerWeb  mutopiatitle
  mutopiapoet    mutopiaopus
  date           moreinfo
Type \"done\" to return to the previous screen.";

const LIST_HELP: &str = "\
You can: add, delete, reorder, print, or done when you are satisfied.";

const MOVEMENT_HELP: &str = "\
You can: add, delete, print, or done when you are satisfied.";

/// One interactive editing session over a single piece.
pub struct Session<P: Prompter> {
    prompt: P,
    registry: Registry,
    piece: Piece,
    config_path: PathBuf,
}

impl<P: Prompter> Session<P> {
    pub fn new(prompt: P, registry: Registry, piece: Piece, config_path: PathBuf) -> Self {
        Self {
            prompt,
            registry,
            piece,
            config_path,
        }
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    /// Run the main menu until the user quits.
    pub fn run(&mut self) -> SessionResult<()> {
        if self.piece.opus.is_none() {
            self.piece.opus =
                prompt::optional(&mut self.prompt, "Enter an opus or catalog number for the piece: ")?;
        }
        self.prompt.show(MAIN_HELP);
        loop {
            let command = self.prompt.read_line(&format!("{}> ", self.piece.title()))?;
            if command.is_empty() {
                continue;
            }
            let lower = command.to_lowercase();
            if lower.starts_with('q') {
                self.quit()?;
                return Ok(());
            } else if lower == "help" {
                self.prompt.show(MAIN_HELP);
            } else if lower.starts_with('h') {
                self.header_editor()?;
            } else if lower.starts_with('i') {
                self.instrument_editor()?;
            } else if lower.starts_with('e') {
                self.ensemble_editor()?;
            } else if lower.starts_with('m') {
                self.movement_editor()?;
            } else if lower.starts_with('p') {
                self.print_piece();
            } else {
                self.prompt.show(INVALID);
            }
        }
    }

    fn quit(&mut self) -> SessionResult<()> {
        let save = prompt::confirm(
            &mut self.prompt,
            &format!("Save to {}?", self.config_path.display()),
            true,
        )?;
        if save {
            config::write_piece(&self.config_path, &self.piece)?;
            self.prompt.show(&format!("Saved to {}", self.config_path.display()));
        }
        Ok(())
    }

    fn print_piece(&mut self) {
        self.prompt.show(&format!("Title: {}", self.piece.title()));
        if let Some(headers) = &self.piece.headers {
            self.prompt.show(&format!("Composer: {}", headers.composer.name));
        }
        if let Some(opus) = &self.piece.opus {
            self.prompt.show(&format!("Opus: {opus}"));
        }
        self.prompt.show("Instruments:");
        let lines: Vec<String> = collection::list_with_indexes(&self.piece.instruments)
            .map(|(idx, label)| format!("{idx}: {label}"))
            .collect();
        for line in lines {
            self.prompt.show(&line);
        }
        self.prompt.show(&format!("Movements: {}", self.piece.movements.len()));
    }

    // =========================================================================
    // Header editor
    // =========================================================================

    fn header_editor(&mut self) -> SessionResult<()> {
        if self.piece.headers.is_none() {
            // Headers cannot exist without a title and a composer.
            let name = self.prompt.read_line("Enter composer: ")?;
            let composer = resolve_composer(&mut self.prompt, &mut self.registry, &name)?;
            let title = loop {
                let title = self.prompt.read_line("Enter title: ")?;
                if !title.is_empty() {
                    break title;
                }
                self.prompt.show("A title is required.");
            };
            self.piece.headers = Some(Headers::new(title, composer));
        }
        self.prompt.show(HEADER_HELP);
        loop {
            let field = self.prompt.read_line("Headers> ")?;
            if field.is_empty() {
                continue;
            }
            let lower = field.to_lowercase();
            if lower == "done" {
                return Ok(());
            } else if lower == "title" {
                self.edit_title()?;
            } else if lower.contains("comp") {
                self.edit_composer()?;
            } else if lower.contains("mutopia") {
                self.mutopia_editor()?;
            } else if !self.edit_header_field(&lower)? {
                self.prompt.show(INVALID);
            }
        }
    }

    fn edit_title(&mut self) -> io::Result<()> {
        let Some(headers) = self.piece.headers.as_mut() else {
            return Ok(());
        };
        self.prompt.show(&format!("Current title is \"{}\".", headers.title));
        if let Some(title) =
            prompt::optional(&mut self.prompt, "Enter a new title or press enter to keep it: ")?
        {
            headers.title = title;
        }
        Ok(())
    }

    fn edit_composer(&mut self) -> SessionResult<()> {
        let Some(current) = self.piece.headers.as_ref().map(|h| h.composer.name.clone()) else {
            return Ok(());
        };
        let change = prompt::confirm(
            &mut self.prompt,
            &format!("Current composer is {current}. Would you like to change it?"),
            false,
        )?;
        if change {
            let name = self.prompt.read_line("Enter composer: ")?;
            let composer = resolve_composer(&mut self.prompt, &mut self.registry, &name)?;
            if let Some(headers) = self.piece.headers.as_mut() {
                headers.composer = composer;
            }
        }
        Ok(())
    }

    /// Edit one of the free-text optional headers. Returns false when the
    /// name is not a known field.
    fn edit_header_field(&mut self, name: &str) -> io::Result<bool> {
        let Some(headers) = self.piece.headers.as_mut() else {
            return Ok(false);
        };
        let Some(slot) = header_field(headers, name) else {
            return Ok(false);
        };
        let current = slot.as_deref().unwrap_or("blank");
        self.prompt.show(&format!("{name} is {current}"));
        if let Some(value) = prompt::optional(
            &mut self.prompt,
            &format!("Enter {name} or press enter to leave unchanged: "),
        )? {
            *slot = Some(value);
        }
        Ok(true)
    }

    // =========================================================================
    // Mutopia header editor
    // =========================================================================

    fn mutopia_editor(&mut self) -> SessionResult<()> {
        if self
            .piece
            .headers
            .as_ref()
            .is_some_and(|h| h.mutopiaheaders.is_none())
        {
            let built = self.build_mutopia_headers()?;
            if let Some(headers) = self.piece.headers.as_mut() {
                headers.mutopiaheaders = Some(built);
            }
        }
        self.prompt.show(MUTOPIA_HELP);
        loop {
            let command = self.prompt.read_line("Mutopia Headers> ")?;
            if command.is_empty() {
                continue;
            }
            let lower = command.to_lowercase();
            if lower == "done" {
                return Ok(());
            }
            let Some(mu) = self
                .piece
                .headers
                .as_mut()
                .and_then(|h| h.mutopiaheaders.as_mut())
            else {
                return Ok(());
            };
            match lower.as_str() {
                "source" => {
                    self.prompt.show(&format!("source is {}", mu.source));
                    if let Some(source) = prompt::optional(
                        &mut self.prompt,
                        "Enter source or press enter to leave unchanged: ",
                    )? {
                        mu.source = source;
                    }
                }
                "style" => {
                    self.prompt.show(&format!("style is {}", mu.style()));
                    self.prompt.show(&format!("Styles: {}", STYLES.join(", ")));
                    while let Some(style) = prompt::optional(
                        &mut self.prompt,
                        "Enter style or press enter to leave unchanged: ",
                    )? {
                        match mu.set_style(style) {
                            Ok(()) => break,
                            Err(err) => self.prompt.show(&err.to_string()),
                        }
                    }
                }
                "license" => {
                    self.prompt.show(&format!("license is {}", mu.license()));
                    self.prompt.show(&format!("Licenses: {}", LICENSES.join(", ")));
                    while let Some(license) = prompt::optional(
                        &mut self.prompt,
                        "Enter license or press enter to leave unchanged: ",
                    )? {
                        match mu.set_license(license) {
                            Ok(()) => break,
                            Err(err) => self.prompt.show(&err.to_string()),
                        }
                    }
                }
                _ => {
                    if let Some(slot) = mutopia_field(mu, &lower) {
                        let current = slot.as_deref().unwrap_or("blank");
                        self.prompt.show(&format!("{lower} is {current}"));
                        if let Some(value) = prompt::optional(
                            &mut self.prompt,
                            &format!("Enter {lower} or press enter to leave unchanged: "),
                        )? {
                            *slot = Some(value);
                        }
                    } else {
                        self.prompt.show(INVALID);
                    }
                }
            }
        }
    }

    /// Collect the three mandatory fields, re-prompting exactly the field a
    /// failed construction names.
    fn build_mutopia_headers(&mut self) -> SessionResult<MutopiaHeaders> {
        let source = self.prompt.read_line("Enter the source: ")?;
        self.prompt.show(&format!("Styles: {}", STYLES.join(", ")));
        let mut style = self.prompt.read_line("Enter the style: ")?;
        self.prompt.show(&format!("Licenses: {}", LICENSES.join(", ")));
        let mut license = self.prompt.read_line("Enter the license: ")?;
        loop {
            match MutopiaHeaders::new(&source, &style, &license) {
                Ok(headers) => return Ok(headers),
                Err(err) => match err.field() {
                    "style" => {
                        style = self
                            .prompt
                            .read_line(&format!("Style {style} is not valid. Enter a valid style: "))?;
                    }
                    "license" => {
                        self.prompt.show(&format!("Licenses: {}", LICENSES.join(", ")));
                        license = self.prompt.read_line("Enter a valid license: ")?;
                    }
                    _ => return Err(err.into()),
                },
            }
        }
    }

    // =========================================================================
    // Instrument editor
    // =========================================================================

    fn instrument_editor(&mut self) -> SessionResult<()> {
        self.prompt.show(LIST_HELP);
        collection::show_indexed(&mut self.prompt, &self.piece.instruments);
        loop {
            let choice = self.prompt.read_line("Instruments> ")?;
            if choice.is_empty() {
                continue;
            }
            let lower = choice.to_lowercase();
            if lower.starts_with("do") {
                return Ok(());
            } else if lower.starts_with("de") {
                delete_loop(
                    &mut self.prompt,
                    &mut self.piece.instruments,
                    "instrument",
                )?;
            } else if lower.starts_with('a') {
                let name = self.prompt.read_line("Enter the full instrument name: ")?;
                let instrument = resolve_instrument(&mut self.prompt, &mut self.registry, &name)?;
                self.piece.instruments.push(instrument);
            } else if lower.starts_with('r') {
                self.piece.instruments =
                    collection::reorder(&mut self.prompt, &self.piece.instruments)?;
            } else if lower.starts_with('p') {
                collection::show_indexed(&mut self.prompt, &self.piece.instruments);
            } else {
                self.prompt.show(INVALID);
            }
        }
    }

    // =========================================================================
    // Ensemble editor
    // =========================================================================

    fn ensemble_editor(&mut self) -> SessionResult<()> {
        let name = self.prompt.read_line("Enter the ensemble name: ")?;
        let mut ensemble = Ensemble::new(name);
        self.prompt.show("You will need to add some instruments to the ensemble.");
        let first = self.add_instrument_dialog()?;
        ensemble.add_instrument(first);
        self.prompt.show(LIST_HELP);
        collection::show_indexed(&mut self.prompt, &ensemble.instruments);
        loop {
            let choice = self.prompt.read_line("Ensemble> ")?;
            if choice.is_empty() {
                continue;
            }
            let lower = choice.to_lowercase();
            if lower.starts_with("do") {
                break;
            } else if lower.starts_with("de") {
                delete_loop(&mut self.prompt, &mut ensemble.instruments, "instrument")?;
            } else if lower.starts_with('a') {
                let instrument = self.add_instrument_dialog()?;
                ensemble.add_instrument(instrument);
            } else if lower.starts_with('r') {
                ensemble.instruments = collection::reorder(&mut self.prompt, &ensemble.instruments)?;
            } else if lower.starts_with('p') {
                self.prompt.show(&format!("{}:", ensemble.name));
                collection::show_indexed(&mut self.prompt, &ensemble.instruments);
            } else {
                self.prompt.show(INVALID);
            }
        }
        self.prompt.show(&format!("{}:", ensemble.name));
        collection::show_indexed(&mut self.prompt, &ensemble.instruments);
        let add = prompt::confirm(&mut self.prompt, "Add these instruments to the score?", true)?;
        if add {
            // Independent value copies; the score list manages its own slots.
            self.piece.instruments.extend(ensemble.instruments.iter().cloned());
        }
        Ok(())
    }

    fn add_instrument_dialog(&mut self) -> SessionResult<crate::models::Instrument> {
        let name = self.prompt.read_line("Enter the full instrument name: ")?;
        resolve_instrument(&mut self.prompt, &mut self.registry, &name)
    }

    // =========================================================================
    // Movement editor
    // =========================================================================

    fn movement_editor(&mut self) -> SessionResult<()> {
        self.prompt.show(MOVEMENT_HELP);
        loop {
            let choice = self.prompt.read_line("Movements> ")?;
            if choice.is_empty() {
                continue;
            }
            let lower = choice.to_lowercase();
            if lower.starts_with("do") {
                return Ok(());
            } else if lower.starts_with("de") {
                delete_loop(&mut self.prompt, &mut self.piece.movements, "movement")?;
                renumber(&mut self.piece.movements);
            } else if lower.starts_with('a') {
                let mut movement = Movement::new(self.piece.movements.len() as u32 + 1);
                movement.tempo = prompt::optional(&mut self.prompt, "Tempo: ")?;
                movement.time = prompt::optional(&mut self.prompt, "Time signature: ")?;
                movement.key = prompt::optional(&mut self.prompt, "Key: ")?;
                self.piece.movements.push(movement);
            } else if lower.starts_with('p') {
                collection::show_indexed(&mut self.prompt, &self.piece.movements);
            } else {
                self.prompt.show(INVALID);
            }
        }
    }
}

/// Repeated deletion until blank input. Out-of-range indices are rejected by
/// the prompt layer before they reach the sequence.
fn delete_loop<T: Labeled, P: Prompter>(
    prompt: &mut P,
    items: &mut Vec<T>,
    noun: &str,
) -> io::Result<()> {
    loop {
        if items.is_empty() {
            prompt.show(&format!("No {noun}s to delete."));
            return Ok(());
        }
        collection::show_indexed(prompt, items);
        let Some(idx) = prompt::index(
            prompt,
            &format!("Enter the index of the {noun} to delete or press enter to finish: "),
            items.len() - 1,
            true,
        )?
        else {
            return Ok(());
        };
        let _ = collection::delete_at(items, idx);
    }
}

fn renumber(movements: &mut [Movement]) {
    for (idx, movement) in movements.iter_mut().enumerate() {
        movement.num = idx as u32 + 1;
    }
}

fn header_field<'h>(headers: &'h mut Headers, name: &str) -> Option<&'h mut Option<String>> {
    match name {
        "dedication" => Some(&mut headers.dedication),
        "subtitle" => Some(&mut headers.subtitle),
        "subsubtitle" => Some(&mut headers.subsubtitle),
        "poet" => Some(&mut headers.poet),
        "meter" => Some(&mut headers.meter),
        "arranger" => Some(&mut headers.arranger),
        "tagline" => Some(&mut headers.tagline),
        "copyright" => Some(&mut headers.copyright),
        _ => None,
    }
}

fn mutopia_field<'h>(mu: &'h mut MutopiaHeaders, name: &str) -> Option<&'h mut Option<String>> {
    match name {
        "maintainer" => Some(&mut mu.maintainer),
        "maintaineremail" => Some(&mut mu.maintainer_email),
        "maintainerweb" => Some(&mut mu.maintainer_web),
        "mutopiatitle" => Some(&mut mu.mutopiatitle),
        "mutopiapoet" => Some(&mut mu.mutopiapoet),
        "mutopiaopus" => Some(&mut mu.mutopiaopus),
        "date" => Some(&mut mu.date),
        "moreinfo" => Some(&mut mu.moreinfo),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Composer, Instrument};
    use crate::prompt::ScriptedPrompt;
    use tempfile::tempdir;

    fn session_with(
        answers: &[&str],
        registry: Registry,
        piece: Piece,
        config_path: PathBuf,
    ) -> Session<ScriptedPrompt> {
        Session::new(
            ScriptedPrompt::new(answers.iter().copied()),
            registry,
            piece,
            config_path,
        )
    }

    fn empty_registry() -> (tempfile::TempDir, Registry) {
        let dir = tempdir().unwrap();
        let registry = Registry::open(dir.path().join("registry"));
        (dir, registry)
    }

    #[test]
    fn test_quit_without_save_leaves_no_config() {
        let (dir, registry) = empty_registry();
        let config_path = dir.path().join("piece.json");
        let mut session = session_with(
            &["Op. 1", "q", "n"],
            registry,
            Piece::default(),
            config_path.clone(),
        );
        session.run().unwrap();
        assert!(!config_path.exists());
        assert_eq!(session.piece().opus.as_deref(), Some("Op. 1"));
    }

    #[test]
    fn test_quit_with_save_writes_config() {
        let (dir, registry) = empty_registry();
        let config_path = dir.path().join("piece.json");
        let mut session = session_with(
            &["", "q", "y"],
            registry,
            Piece::default(),
            config_path.clone(),
        );
        session.run().unwrap();
        assert_eq!(config::read_piece(&config_path), Some(Piece::default()));
    }

    #[test]
    fn test_unrecognized_command_reprompts() {
        let (dir, registry) = empty_registry();
        let mut session = session_with(
            &["", "xyzzy", "q", "n"],
            registry,
            Piece::default(),
            dir.path().join("piece.json"),
        );
        session.run().unwrap();
        assert!(session.prompt.transcript.iter().any(|t| t == INVALID));
    }

    #[test]
    fn test_header_entry_forces_title_and_composer() {
        let (dir, registry) = empty_registry();
        let answers = [
            "",          // opus
            "header",    // main menu
            "Bach",      // composer free text (no match -> manual)
            "",          // short name default
            "",          // publication name default
            "n",         // do not persist
            "",          // blank title rejected
            "Cello Suite No. 1",
            "done",      // leave header editor
            "q", "n",
        ];
        let mut session = session_with(&answers, registry, Piece::default(), dir.path().join("p.json"));
        session.run().unwrap();
        let headers = session.piece().headers.as_ref().unwrap();
        assert!(headers.is_complete());
        assert_eq!(headers.title, "Cello Suite No. 1");
        assert_eq!(headers.composer.name, "Bach");
        assert!(session.prompt.transcript.iter().any(|t| t.contains("A title is required")));
    }

    #[test]
    fn test_header_optional_field_blank_keeps_value() {
        let (dir, registry) = empty_registry();
        let mut piece = Piece::default();
        let mut headers = Headers::new("Quartet", Composer::new("Haydn"));
        headers.dedication = Some("To the Prince".into());
        piece.headers = Some(headers);
        let answers = [
            "", "h",
            "dedication", "",          // blank leaves unchanged
            "poet", "Anonymous",       // sets a new field
            "done", "q", "n",
        ];
        let mut session = session_with(&answers, registry, piece, dir.path().join("p.json"));
        session.run().unwrap();
        let headers = session.piece().headers.as_ref().unwrap();
        assert_eq!(headers.dedication.as_deref(), Some("To the Prince"));
        assert_eq!(headers.poet.as_deref(), Some("Anonymous"));
    }

    #[test]
    fn test_mutopia_construction_reprompts_offending_field() {
        let (dir, registry) = empty_registry();
        let mut piece = Piece::default();
        piece.headers = Some(Headers::new("Suite", Composer::new("Bach")));
        let answers = [
            "", "h", "mutopia",
            "Urtext",           // source
            "bogus",            // style - invalid
            "Public Domain",    // license
            "Baroque",          // corrected style
            "done",             // leave mutopia editor
            "done", "q", "n",
        ];
        let mut session = session_with(&answers, registry, piece, dir.path().join("p.json"));
        session.run().unwrap();
        let mu = session
            .piece()
            .headers
            .as_ref()
            .unwrap()
            .mutopiaheaders
            .as_ref()
            .unwrap();
        assert_eq!(mu.style(), "Baroque");
        assert_eq!(mu.license(), "Public Domain");
        assert!(session
            .prompt
            .transcript
            .iter()
            .any(|t| t.contains("Style bogus is not valid")));
    }

    #[test]
    fn test_mutopia_optional_field_edit() {
        let (dir, registry) = empty_registry();
        let mut piece = Piece::default();
        let mut headers = Headers::new("Suite", Composer::new("Bach"));
        headers.mutopiaheaders =
            Some(MutopiaHeaders::new("Urtext", "Baroque", "Public Domain").unwrap());
        piece.headers = Some(headers);
        let answers = [
            "", "h", "mutopia",
            "maintainerEmail", "someone@example.org",
            "done", "done", "q", "n",
        ];
        let mut session = session_with(&answers, registry, piece, dir.path().join("p.json"));
        session.run().unwrap();
        let mu = session
            .piece()
            .headers
            .as_ref()
            .unwrap()
            .mutopiaheaders
            .as_ref()
            .unwrap();
        assert_eq!(mu.maintainer_email.as_deref(), Some("someone@example.org"));
    }

    #[test]
    fn test_instrument_editor_add_from_registry() {
        let dir = tempdir().unwrap();
        let mut registry = Registry::open(dir.path().join("registry"));
        let mut violin = Instrument::new("Violin");
        violin.set_clef(Some("treble".into())).unwrap();
        registry.save_instrument(&violin).unwrap();

        let answers = [
            "", "i",
            "add", "Violin 2", "",  // confirm load
            "done", "q", "n",
        ];
        let mut session = session_with(&answers, registry, Piece::default(), dir.path().join("p.json"));
        session.run().unwrap();
        let instruments = &session.piece().instruments;
        assert_eq!(instruments.len(), 1);
        assert_eq!(instruments[0].name, "violin");
        assert_eq!(instruments[0].number, Some(2));
    }

    #[test]
    fn test_instrument_editor_delete_until_blank() {
        let (dir, registry) = empty_registry();
        let mut piece = Piece::default();
        piece.instruments = vec![
            Instrument::new("Violin"),
            Instrument::new("Viola"),
            Instrument::new("Violoncello"),
        ];
        let answers = [
            "", "i",
            "delete", "1", "",  // delete viola, finish deleting
            "done", "q", "n",
        ];
        let mut session = session_with(&answers, registry, piece, dir.path().join("p.json"));
        session.run().unwrap();
        let names: Vec<_> = session.piece().instruments.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["violin", "violoncello"]);
    }

    #[test]
    fn test_instrument_editor_reorder() {
        let (dir, registry) = empty_registry();
        let mut piece = Piece::default();
        piece.instruments = vec![
            Instrument::new("Violin"),
            Instrument::new("Viola"),
            Instrument::new("Violoncello"),
        ];
        let answers = [
            "", "i",
            "reorder", "2", "0", "y", "",  // move cello to front, confirm, finish
            "done", "q", "n",
        ];
        let mut session = session_with(&answers, registry, piece, dir.path().join("p.json"));
        session.run().unwrap();
        let names: Vec<_> = session.piece().instruments.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["violoncello", "violin", "viola"]);
    }

    #[test]
    fn test_ensemble_editor_appends_to_score_on_confirm() {
        let dir = tempdir().unwrap();
        let mut registry = Registry::open(dir.path().join("registry"));
        for name in ["Violin", "Viola", "Violoncello"] {
            registry.save_instrument(&Instrument::new(name)).unwrap();
        }
        let answers = [
            "", "e",
            "String Trio",
            "Violin", "",       // first instrument, confirm load
            "add", "Viola", "", // second
            "done",
            "y",                // add to score
            "q", "n",
        ];
        let mut session = session_with(&answers, registry, Piece::default(), dir.path().join("p.json"));
        session.run().unwrap();
        let names: Vec<_> = session.piece().instruments.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["violin", "viola"]);
    }

    #[test]
    fn test_movement_editor_add_and_renumber() {
        let (dir, registry) = empty_registry();
        let answers = [
            "", "m",
            "add", "Allegro", "4/4", "G major",
            "add", "Adagio", "3/4", "",
            "delete", "0", "",
            "done", "q", "n",
        ];
        let mut session = session_with(&answers, registry, Piece::default(), dir.path().join("p.json"));
        session.run().unwrap();
        let movements = &session.piece().movements;
        assert_eq!(movements.len(), 1);
        assert_eq!(movements[0].num, 1);
        assert_eq!(movements[0].tempo.as_deref(), Some("Adagio"));
        assert!(movements[0].key.is_none());
    }
}
