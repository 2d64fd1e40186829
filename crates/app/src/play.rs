//! Line-oriented play loop.
//!
//! A plain line is typed and submitted in one go, so a long enough prefix
//! submits its suggestion. `?text` only previews the suggestion.

use std::io::{self, Write};

use dex_core::ChallengeState;
use services::AppServices;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::vm::ChallengeVm;

const HELP: &[&str] = &[
    "Type a name and press enter to submit it.",
    "  ?<text>  preview the suggestion for <text>",
    "  :list    show everything entered so far",
    "  :reset   start over and forget saved progress",
    "  :quit    leave (progress is kept)",
];

#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Guess(&'a str),
    Preview(&'a str),
    List,
    Reset,
    Help,
    Quit,
    Unknown(&'a str),
}

fn classify(line: &str) -> Line<'_> {
    if let Some(text) = line.strip_prefix('?') {
        return Line::Preview(text);
    }
    match line.trim() {
        ":list" | ":l" => Line::List,
        ":reset" => Line::Reset,
        ":help" | ":h" => Line::Help,
        ":quit" | ":q" => Line::Quit,
        cmd if cmd.starts_with(':') => Line::Unknown(cmd),
        _ => Line::Guess(line),
    }
}

/// Run an interactive session until input ends, `:quit`, or completion.
///
/// # Errors
///
/// Only I/O failures on `input` or `out` are returned; storage problems are
/// absorbed by the challenge service.
pub async fn run_session<R, W>(services: &AppServices, input: R, out: &mut W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let challenge = services.challenge();
    let groups = services.options().groups();
    let mut state = challenge.start(services.working_set()).await;

    let view = state.view();
    writeln!(out, "{}", ChallengeVm::new(&view).header(groups))?;
    if let Some(done) = ChallengeVm::new(&view).complete_line() {
        writeln!(out, "{done}")?;
        writeln!(out, "Run `dex-challenge reset` to play again.")?;
        return Ok(());
    }
    writeln!(out, "Type :help for commands.")?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        match classify(&line) {
            Line::Guess(text) => {
                if !guess(services, &mut state, text, out).await? {
                    break;
                }
            }
            Line::Preview(text) => {
                let view = challenge.input_changed(&mut state, text);
                match ChallengeVm::new(&view).suggestion_line() {
                    Some(hint) => writeln!(out, "{hint}")?,
                    None => writeln!(out, "  no suggestion")?,
                }
            }
            Line::List => {
                let view = state.view();
                let vm = ChallengeVm::new(&view);
                writeln!(out, "{}", vm.header(groups))?;
                for entry in vm.entered_lines() {
                    writeln!(out, "{entry}")?;
                }
            }
            Line::Reset => {
                let view = challenge.reset(&mut state).await;
                writeln!(out, "{}", ChallengeVm::new(&view).header(groups))?;
            }
            Line::Help => {
                for help in HELP {
                    writeln!(out, "{help}")?;
                }
            }
            Line::Quit => break,
            Line::Unknown(cmd) => writeln!(out, "unknown command {cmd}, try :help")?,
        }
        out.flush()?;
    }
    Ok(())
}

/// Submits `text`. Returns `false` once the challenge is complete.
async fn guess<W: Write>(
    services: &AppServices,
    state: &mut ChallengeState,
    text: &str,
    out: &mut W,
) -> io::Result<bool> {
    let challenge = services.challenge();
    challenge.input_changed(state, text);
    let result = challenge.submit(state).await;

    let view = state.view();
    let vm = ChallengeVm::new(&view);
    writeln!(out, "{}", vm.submit_line(&result))?;
    if let Some(done) = vm.complete_line() {
        writeln!(out, "{done}")?;
        return Ok(false);
    }
    Ok(true)
}

/// One-shot summary for `dex-challenge status`.
pub async fn print_status<W: Write>(services: &AppServices, out: &mut W) -> io::Result<()> {
    let state = services.challenge().start(services.working_set()).await;
    let view = state.view();
    let vm = ChallengeVm::new(&view);
    writeln!(out, "{}", vm.header(services.options().groups()))?;
    for entry in vm.entered_lines() {
        writeln!(out, "{entry}")?;
    }
    if let Some(done) = vm.complete_line() {
        writeln!(out, "{done}")?;
    }
    Ok(())
}

/// Clears saved progress for the current selection.
pub async fn reset_progress<W: Write>(services: &AppServices, out: &mut W) -> io::Result<()> {
    let challenge = services.challenge();
    let mut state = challenge.start(services.working_set()).await;
    let view = challenge.reset(&mut state).await;
    writeln!(out, "Progress cleared. {}", ChallengeVm::new(&view).header(services.options().groups()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dex_core::model::{Dataset, Entry, EntryKey, Group, Order};
    use services::ChallengeOptions;

    fn dataset() -> Dataset {
        let entries = [
            ("bulbasaur", "Bulbasaur", 1, 1),
            ("ivysaur", "Ivysaur", 2, 1),
            ("mr-mime", "Mr. Mime", 122, 1),
            ("chikorita", "Chikorita", 152, 2),
        ]
        .into_iter()
        .map(|(key, name, order, group)| {
            Entry::new(
                EntryKey::new(key),
                name,
                Order::new(order),
                format!("{key}.png"),
                Group::from(group),
            )
            .unwrap()
        });
        Dataset::new(entries).unwrap()
    }

    async fn play(services: &AppServices, script: &str) -> String {
        let mut out = Vec::new();
        run_session(services, script.as_bytes(), &mut out)
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn classifies_lines() {
        assert_eq!(classify("Mr. Mime"), Line::Guess("Mr. Mime"));
        assert_eq!(classify("?ivys"), Line::Preview("ivys"));
        assert_eq!(classify(" :q "), Line::Quit);
        assert_eq!(classify(":list"), Line::List);
        assert_eq!(classify(":fly"), Line::Unknown(":fly"));
    }

    #[tokio::test]
    async fn plays_through_to_completion() {
        let services =
            AppServices::in_memory(&dataset(), ChallengeOptions::with_groups([Group::from(1)]))
                .unwrap();
        let output = play(
            &services,
            "mr. mime\nmissingno\n?ivys\nivys\nbulbasaur\nnever read\n",
        )
        .await;

        assert!(output.contains("✓ #122 Mr. Mime  [1/3]"), "{output}");
        assert!(output.contains("✗ \"missingno\""), "{output}");
        assert!(output.contains("suggestion: Ivysaur"), "{output}");
        assert!(output.contains("✓ #002 Ivysaur  [2/3]"), "{output}");
        assert!(output.contains("Complete! All 3 caught."), "{output}");
        assert!(!output.contains("never read"));
    }

    #[tokio::test]
    async fn resumed_complete_session_stops_immediately() {
        let services =
            AppServices::in_memory(&dataset(), ChallengeOptions::with_groups([Group::from(2)]))
                .unwrap();
        play(&services, "chikorita\n").await;

        let output = play(&services, "bulbasaur\n").await;
        assert!(output.contains("1 caught, 0 remaining"), "{output}");
        assert!(output.contains("Complete!"), "{output}");
        assert!(!output.contains('✗'));
    }

    #[tokio::test]
    async fn list_reset_and_status() {
        let services = AppServices::in_memory(&dataset(), ChallengeOptions::all()).unwrap();
        let output = play(&services, "chikorita\nbulbasaur\n:list\n:quit\nivysaur\n").await;
        assert!(output.contains("* #001 Bulbasaur\n  #152 Chikorita"), "{output}");
        assert!(!output.contains("Ivysaur"));

        let mut status = Vec::new();
        print_status(&services, &mut status).await.unwrap();
        let status = String::from_utf8(status).unwrap();
        assert!(status.contains("2 caught, 2 remaining"), "{status}");

        let mut cleared = Vec::new();
        reset_progress(&services, &mut cleared).await.unwrap();
        assert!(String::from_utf8(cleared).unwrap().contains("0 caught, 4 remaining"));
    }
}
