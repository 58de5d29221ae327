//! Interactive menus and the question loop.

use std::io::{self, BufRead, Write};

use drill_core::{Navigable, NavigationError, OrderingPolicy};
use services::session::render_cells;
use services::{SessionStats, TopicSession, TopicSessionService};
use storage::repository::TopicInfo;
use tracing::warn;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const WIDE_RULE: usize = 60;
const RULE: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Console front end over any line-based input and output.
pub struct Console<I, O> {
    input: I,
    output: O,
    service: TopicSessionService,
    stats: SessionStats,
    learner: String,
}

impl<I: BufRead, O: Write> Console<I, O> {
    pub fn new(input: I, output: O, service: TopicSessionService, stats: SessionStats) -> Self {
        Self {
            input,
            output,
            service,
            stats,
            learner: String::new(),
        }
    }

    #[cfg(test)]
    fn stats(&self) -> &SessionStats {
        &self.stats
    }

    #[cfg(test)]
    fn into_output(self) -> O {
        self.output
    }

    /// Run until the learner quits or input ends.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the underlying reader or writer.
    pub fn run(&mut self) -> io::Result<()> {
        self.print_banner()?;

        let Some(name) = self.ask_name()? else {
            return Ok(());
        };
        self.learner = name;
        self.stats.start();
        writeln!(
            self.output,
            "\nWelcome, {}! Let's practice object-oriented programming.",
            self.learner
        )?;

        while self.main_menu()? == Flow::Continue {}

        self.stats.finish();
        writeln!(self.output, "\nThanks for practicing, {}!", self.learner)?;
        writeln!(self.output, "Session time: {}", self.stats.format_elapsed())?;
        self.output.flush()
    }

    fn print_banner(&mut self) -> io::Result<()> {
        let rule = "=".repeat(70);
        let names: Vec<String> = self.service.topics().into_iter().map(|t| t.title).collect();
        writeln!(self.output, "{rule}")?;
        writeln!(self.output, "            OBJECT-ORIENTED PROGRAMMING DRILL")?;
        writeln!(self.output, "                      Version {VERSION}")?;
        writeln!(self.output, "{rule}")?;
        writeln!(self.output, "Topics: {}", names.join(" | "))?;
        writeln!(self.output, "{rule}")
    }

    fn ask_name(&mut self) -> io::Result<Option<String>> {
        let mut message = "Enter your name to begin: ";
        loop {
            match prompt(&mut self.input, &mut self.output, message)? {
                None => return Ok(None),
                Some(name) if !name.is_empty() => return Ok(Some(name)),
                Some(_) => message = "Name cannot be empty. Enter your name: ",
            }
        }
    }

    fn main_menu(&mut self) -> io::Result<Flow> {
        if !self.stats.is_active() {
            self.stats.start();
        }

        let rule = "=".repeat(WIDE_RULE);
        writeln!(self.output, "\n{rule}")?;
        writeln!(self.output, "  OOP PRACTICE DRILL v{VERSION}")?;
        writeln!(
            self.output,
            "  Learner: {} | Time: {}",
            self.learner,
            self.stats.format_elapsed()
        )?;
        writeln!(self.output, "{}", self.stats.snapshot())?;
        writeln!(self.output, "{rule}")?;
        writeln!(self.output, "1. Practice a topic")?;
        writeln!(self.output, "2. View statistics")?;
        writeln!(self.output, "3. Reset progress")?;
        writeln!(self.output, "4. Quit")?;

        let Some(choice) = prompt(&mut self.input, &mut self.output, "\nChoose an option (1-4): ")?
        else {
            return Ok(Flow::Quit);
        };

        match choice.as_str() {
            "1" => self.topic_menu(),
            "2" => self.show_statistics(),
            "3" => self.reset_progress(),
            "4" => Ok(Flow::Quit),
            _ => {
                writeln!(self.output, "Invalid option! Choose 1-4.")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn topic_menu(&mut self) -> io::Result<Flow> {
        let topics = self.service.topics();
        let back = topics.len() + 1;

        loop {
            let rule = "=".repeat(RULE);
            writeln!(self.output, "\n{rule}")?;
            writeln!(self.output, "        PRACTICE: OBJECT-ORIENTED PROGRAMMING")?;
            writeln!(self.output, "{rule}")?;
            for (index, info) in topics.iter().enumerate() {
                writeln!(
                    self.output,
                    "{}. {} ({} questions)",
                    index + 1,
                    info.title,
                    info.question_count
                )?;
            }
            writeln!(self.output, "{back}. Back to main menu")?;

            let message = format!("\nChoose an option (1-{back}): ");
            let Some(choice) = prompt(&mut self.input, &mut self.output, &message)? else {
                return Ok(Flow::Quit);
            };

            match choice.parse::<usize>() {
                Ok(n) if n == back => return Ok(Flow::Continue),
                Ok(n) if (1..back).contains(&n) => return self.practice(&topics[n - 1]),
                _ => writeln!(self.output, "Invalid option! Choose 1-{back}.")?,
            }
        }
    }

    fn choose_ordering(&mut self) -> io::Result<Option<OrderingPolicy>> {
        let fallback = self.service.config().default_ordering();
        writeln!(self.output, "\nHow should the questions be ordered?")?;
        for (index, policy) in OrderingPolicy::ALL.iter().enumerate() {
            writeln!(self.output, "{}. {} ({})", index + 1, policy, policy.description())?;
        }

        let Some(choice) = prompt(&mut self.input, &mut self.output, "Choose (1-3): ")? else {
            return Ok(None);
        };

        let policy = match choice.parse::<usize>() {
            Ok(n) if (1..=OrderingPolicy::ALL.len()).contains(&n) => OrderingPolicy::ALL[n - 1],
            _ => {
                writeln!(self.output, "Invalid option. Using {fallback} order.")?;
                fallback
            }
        };
        Ok(Some(policy))
    }

    fn practice(&mut self, info: &TopicInfo) -> io::Result<Flow> {
        let Some(ordering) = self.choose_ordering()? else {
            return Ok(Flow::Quit);
        };
        writeln!(self.output, "\nSorting questions ({ordering})...")?;
        self.output.flush()?;

        let Self {
            input,
            output,
            service,
            stats,
            ..
        } = self;

        let mut session = match service.start_topic(&info.name, Some(ordering), stats) {
            Ok(session) => session,
            Err(err) => {
                warn!(topic = %info.name, error = %err, "could not start topic");
                writeln!(output, "Could not load questions: {err}")?;
                return Ok(Flow::Continue);
            }
        };

        writeln!(
            output,
            "\nStarting {}! {} questions.",
            session.title().to_uppercase(),
            session.len()
        )?;

        match run_questions(input, output, &mut session)? {
            Some(flow) => Ok(flow),
            None => {
                writeln!(output, "\n{}", session.summary())?;
                writeln!(
                    output,
                    "\nWell done! You finished: {}",
                    session.title().to_uppercase()
                )?;
                let flow = pause(input, output, "\nPress ENTER to return to the menu...")?;
                Ok(flow)
            }
        }
    }

    fn show_statistics(&mut self) -> io::Result<Flow> {
        let total = self.service.topic_count();
        let snapshot = self.stats.snapshot();
        writeln!(self.output, "\n{}", snapshot.report(total))?;
        writeln!(
            self.output,
            "Topics: {} {}/{total} topics",
            render_cells(snapshot.overall_progress(total)),
            snapshot.topics.len()
        )?;
        pause(
            &mut self.input,
            &mut self.output,
            "\nPress ENTER to return to the menu...",
        )
    }

    fn reset_progress(&mut self) -> io::Result<Flow> {
        let Some(answer) = prompt(
            &mut self.input,
            &mut self.output,
            "\nReset all progress? (Y/N): ",
        )?
        else {
            return Ok(Flow::Quit);
        };

        if answer.eq_ignore_ascii_case("y") {
            self.stats.reset();
            writeln!(self.output, "Progress reset.")?;
        }
        pause(&mut self.input, &mut self.output, "\nPress ENTER to continue...")
    }
}

/// Drive one topic session. `Some(flow)` means the learner left early.
fn run_questions<I: BufRead, O: Write>(
    input: &mut I,
    output: &mut O,
    session: &mut TopicSession<'_, SessionStats>,
) -> io::Result<Option<Flow>> {
    while let Some(question) = session.current() {
        writeln!(output, "\n{}", question.render())?;
        writeln!(output, "Progress: {}", session.progress().render_bar())?;

        writeln!(output, "\nType your answer or a command:")?;
        if question.kind().is_lettered() {
            writeln!(output, "  For lettered options, type the letter (A, B, C, D)")?;
        }
        if session.has_previous() {
            writeln!(output, "  'B' or 'BACK' - previous question")?;
        }
        if session.has_next() {
            writeln!(output, "  'S' or 'SKIP' - skip this question")?;
        }
        writeln!(output, "  'M' or 'MENU' - back to the menu")?;
        writeln!(output, "\nSession: {}", session.recorder().snapshot())?;

        let Some(entry) = prompt(input, output, "\nYour choice: ")? else {
            return Ok(Some(Flow::Quit));
        };

        match entry.to_uppercase().as_str() {
            "B" | "BACK" => {
                if let Err(err) = session.retreat() {
                    writeln!(output, "{}", capitalize(&err.to_string()))?;
                }
            }
            "S" | "SKIP" => {
                session.skip();
                writeln!(output, "\nQuestion skipped.")?;
                if !step_forward(output, session)? {
                    break;
                }
            }
            "M" | "MENU" => {
                navigate(output, session.return_to_menu())?;
                return Ok(Some(Flow::Continue));
            }
            _ => {
                if let Some(outcome) = session.answer_current(&entry) {
                    if outcome.correct {
                        writeln!(output, "\nCORRECT! Well done!")?;
                    } else {
                        writeln!(output, "\nINCORRECT!")?;
                        if let Some(hint) = outcome.hint {
                            writeln!(output, "{hint}")?;
                        }
                        writeln!(output, "Correct answer: {}", outcome.canonical_answer)?;
                        writeln!(output, "Explanation: {}", outcome.explanation)?;
                    }
                }

                if pause(input, output, "\nPress ENTER to continue...")? == Flow::Quit {
                    return Ok(Some(Flow::Quit));
                }
                if !step_forward(output, session)? {
                    break;
                }
            }
        }
    }
    Ok(None)
}

/// Advance if possible. Returns false at the last question.
fn step_forward<O: Write>(
    output: &mut O,
    session: &mut TopicSession<'_, SessionStats>,
) -> io::Result<bool> {
    if !session.has_next() {
        return Ok(false);
    }
    navigate(output, session.advance())?;
    Ok(true)
}

fn navigate<O: Write>(
    output: &mut O,
    result: Result<(), NavigationError>,
) -> io::Result<()> {
    if let Err(err) = result {
        warn!(error = %err, "navigation failed");
        writeln!(output, "Navigation error: {err}")?;
    }
    Ok(())
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn read_line<I: BufRead>(input: &mut I) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

fn prompt<I: BufRead, O: Write>(
    input: &mut I,
    output: &mut O,
    message: &str,
) -> io::Result<Option<String>> {
    write!(output, "{message}")?;
    output.flush()?;
    read_line(input)
}

fn pause<I: BufRead, O: Write>(input: &mut I, output: &mut O, message: &str) -> io::Result<Flow> {
    Ok(match prompt(input, output, message)? {
        Some(_) => Flow::Continue,
        None => Flow::Quit,
    })
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::model::{Difficulty, FillCode, MultipleChoice, Question, TopicName};
    use drill_core::time::fixed_clock;
    use services::SessionConfig;
    use std::sync::Arc;
    use storage::repository::InMemoryCatalog;

    fn mc(prompt: &str, difficulty: Difficulty) -> Question {
        Question::new(
            prompt,
            difficulty,
            "Because A.",
            MultipleChoice::new(["w", "x", "y", "z"].map(String::from), "A").unwrap(),
        )
        .unwrap()
    }

    fn service() -> TopicSessionService {
        let fill = Question::new(
            "Complete the getter",
            Difficulty::Hard,
            "Getters return the field.",
            FillCode::new("return ______;", "name").unwrap(),
        )
        .unwrap();
        let catalog = InMemoryCatalog::new()
            .with_topic(
                TopicName::new("encapsulation").unwrap(),
                "Encapsulation",
                vec![mc("first", Difficulty::Easy), mc("second", Difficulty::Medium), fill],
            )
            .unwrap()
            .with_topic(
                TopicName::new("abstraction").unwrap(),
                "Abstraction",
                vec![mc("only", Difficulty::Easy)],
            )
            .unwrap();
        TopicSessionService::new(Arc::new(catalog))
            .with_config(SessionConfig::default().with_shuffle_seed(Some(1)))
    }

    fn run(script: &str) -> (SessionStats, String) {
        let stats = SessionStats::new().with_clock(fixed_clock());
        let mut console = Console::new(script.as_bytes(), Vec::new(), service(), stats);
        console.run().unwrap();
        let stats = console.stats().clone();
        let output = String::from_utf8(console.into_output()).unwrap();
        (stats, output)
    }

    #[test]
    fn answers_a_whole_topic_in_ascending_order() {
        // name, practice, topic 1, ascending, then three answers each followed by ENTER.
        let (stats, output) = run("Ada\n1\n1\n2\na\n\nC\n\nthis.age\n\n\n4\n");

        assert_eq!(stats.correct(), 1);
        assert_eq!(stats.incorrect(), 2);
        assert!(output.contains("CORRECT! Well done!"));
        assert!(output.contains("Correct answer: A"));
        assert!(output.contains("Correct answer: name"));
        assert!(output.contains("[██████████] 100.0% (3/3)"));
        assert!(output.contains("TOPIC SUMMARY: ENCAPSULATION"));
        assert!(output.contains("Thanks for practicing, Ada!"));
    }

    #[test]
    fn skip_back_and_menu_commands() {
        let (stats, output) = run("Ada\n1\n1\n2\nB\nS\nback\nm\n4\n");

        assert!(output.contains("There is no previous question"));
        assert!(output.contains("Question skipped."));
        assert_eq!(stats.skipped(), 1);
        assert_eq!(stats.answered(), 0);
        assert!(!output.contains("TOPIC SUMMARY"));
        assert_eq!(stats.studied_topics().len(), 1);
    }

    #[test]
    fn skipping_the_last_question_ends_the_topic() {
        let (stats, output) = run("Ada\n1\n2\n1\ns\n\n4\n");
        assert_eq!(stats.skipped(), 1);
        assert!(output.contains("TOPIC SUMMARY: ABSTRACTION"));
    }

    #[test]
    fn invalid_choices_are_reported() {
        let (_, output) = run("\n  \nAda\n9\n1\n7\n3\n4\n");
        assert!(output.contains("Name cannot be empty"));
        assert!(output.contains("Invalid option! Choose 1-4."));
        assert!(output.contains("Invalid option! Choose 1-3."));
    }

    #[test]
    fn invalid_ordering_falls_back_to_default() {
        let (_, output) = run("Ada\n1\n2\nx\nM\n4\n");
        assert!(output.contains("Invalid option. Using randomized order."));
    }

    #[test]
    fn statistics_and_reset() {
        let (stats, output) = run("Ada\n1\n2\n1\na\n\n\n2\n\n3\ny\n\n4\n");
        assert!(output.contains("Questions answered: 1"));
        assert!(output.contains("Topics studied: 1/2"));
        assert!(output.contains("Progress reset."));
        assert_eq!(stats.answered(), 0);
        assert!(stats.studied_topics().is_empty());
    }

    #[test]
    fn end_of_input_quits_cleanly() {
        let (stats, output) = run("Ada\n1\n1\n");
        assert!(output.contains("Choose (1-3)"));
        assert!(stats.studied_topics().is_empty());

        let (_, output) = run("");
        assert!(!output.contains("Welcome"));
    }
}
