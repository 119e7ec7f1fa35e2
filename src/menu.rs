//! Line-oriented console prompts.
//!
//! Two kinds of question are asked:
//! - pick one entry of a list by its index ([`Prompter::choose_from_list`])
//! - pick one of a few named actions, typed in full or by a short prefix
//!   ([`Prompter::choose`]), e.g. `[o]verride, [c]ancel`
//!
//! Both block until a valid answer is typed. The only way out besides a valid
//! answer is a closed input stream, which is reported as an error.

use std::io::{self, BufRead, Stdout, Write};

use crate::{
    debug,
    error::{Result, StitchError},
};

/// A question with named answers. Each label maps to the value returned when
/// it is picked; labels are shown in insertion order.
#[derive(Debug, Clone)]
pub struct Menu<T> {
    message: String,
    options: Vec<(String, T)>,
}

impl<T> Menu<T> {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            options: Vec::new(),
        }
    }

    pub fn option(mut self, label: impl Into<String>, value: T) -> Self {
        let label = label.into();
        debug_assert!(
            !self.options.iter().any(|(existing, _)| *existing == label),
            "duplicate menu label {label}"
        );
        self.options.push((label, value));
        self
    }
}

/// Shortest unique prefix for each label, in the order given.
///
/// Labels are visited shortest first. A prefix is taken when no earlier label
/// claimed it and it is not itself one of the labels, so typing any full
/// label always stays unambiguous. Labels with no such prefix get `None`.
pub fn assign_shortcuts(labels: &[&str]) -> Vec<Option<String>> {
    let mut order: Vec<usize> = (0..labels.len()).collect();
    order.sort_by_key(|&i| labels[i].chars().count());

    let mut claimed: Vec<&str> = Vec::new();
    let mut shortcuts = vec![None; labels.len()];

    for i in order {
        let label = labels[i];
        let shortcut = label
            .char_indices()
            .skip(1)
            .map(|(end, _)| &label[..end])
            .find(|prefix| !claimed.contains(prefix) && !labels.contains(prefix));

        if let Some(prefix) = shortcut {
            claimed.push(prefix);
            shortcuts[i] = Some(prefix.to_string());
        }
    }

    shortcuts
}

/// `override` with shortcut `o` renders as `[o]verride`.
pub fn format_label(label: &str, shortcut: Option<&str>) -> String {
    match shortcut {
        Some(prefix) => format!("[{prefix}]{}", &label[prefix.len()..]),
        None => label.to_string(),
    }
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<io::StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Shows `options` with right-aligned zero-based indices and asks for
    /// one of them until a valid index is typed.
    pub fn choose_from_list<'a>(&mut self, options: &'a [String], message: &str) -> Result<&'a str> {
        if options.is_empty() {
            return Err(StitchError::NothingToChoose(message.to_string()));
        }

        self.println(message)?;
        let width = (options.len() - 1).to_string().len() + 2;

        loop {
            for (index, option) in options.iter().enumerate() {
                self.println(&format!("{:>width$} {option}", format!("[{index}]")))?;
            }
            self.print("which one do you want to use? ")?;

            let answer = self.read_line()?;
            match answer.parse::<usize>() {
                Ok(index) if index < options.len() => {
                    debug!("[MENU] '{}' -> {}", message, options[index]);
                    return Ok(options[index].as_str());
                }
                _ => self.println("Sorry, invalid choice. Try again:")?,
            }
        }
    }

    /// Asks `menu` until a label or a shortcut is typed and returns the value
    /// bound to that label.
    pub fn choose<T>(&mut self, menu: Menu<T>) -> Result<T> {
        let Menu { message, mut options } = menu;
        if options.is_empty() {
            return Err(StitchError::NothingToChoose(message));
        }

        let labels: Vec<&str> = options.iter().map(|(label, _)| label.as_str()).collect();
        let shortcuts = assign_shortcuts(&labels);
        let display = labels
            .iter()
            .zip(&shortcuts)
            .map(|(label, shortcut)| format_label(label, shortcut.as_deref()))
            .collect::<Vec<_>>()
            .join(", ");

        self.print(&format!("{message} ({display}): "))?;

        let picked = loop {
            let answer = self.read_line()?;
            let by_shortcut = shortcuts.iter().position(|s| s.as_deref() == Some(answer.as_str()));
            let by_label = || labels.iter().position(|label| *label == answer);

            match by_shortcut.or_else(by_label) {
                Some(index) => break index,
                None => self.print(&format!("Sorry, invalid choice. Try again ({display}): "))?,
            }
        };

        debug!("[MENU] '{}' -> {}", message, labels[picked]);
        Ok(options.swap_remove(picked).1)
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| StitchError::io("could not read from standard input", e))?;

        if read == 0 {
            return Err(StitchError::InputClosed);
        }

        Ok(line.trim().to_string())
    }

    fn print(&mut self, text: &str) -> Result<()> {
        write!(self.output, "{text}")
            .and_then(|_| self.output.flush())
            .map_err(|e| StitchError::io("could not write to standard output", e))
    }

    pub fn println(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}").map_err(|e| StitchError::io("could not write to standard output", e))
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use pretty_assertions::assert_eq;

    use super::*;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn owned(expected: &[Option<&str>]) -> Vec<Option<String>> {
        expected.iter().map(|s| s.map(str::to_string)).collect()
    }

    #[test]
    fn yes_no_shortcuts() {
        assert_eq!(assign_shortcuts(&["yes", "no"]), owned(&[Some("y"), Some("n")]));
        // Same result every time.
        assert_eq!(assign_shortcuts(&["yes", "no"]), assign_shortcuts(&["yes", "no"]));
    }

    #[test]
    fn override_cancel_shortcuts() {
        assert_eq!(assign_shortcuts(&["override", "cancel"]), owned(&[Some("o"), Some("c")]));
    }

    #[test]
    fn shorter_label_claims_first() {
        assert_eq!(assign_shortcuts(&["yellow", "yes"]), owned(&[Some("ye"), Some("y")]));
    }

    #[test]
    fn equal_length_ties_keep_insertion_order() {
        assert_eq!(assign_shortcuts(&["bat", "bag"]), owned(&[Some("b"), Some("ba")]));
    }

    #[test]
    fn prefix_equal_to_other_label_is_skipped() {
        assert_eq!(assign_shortcuts(&["no", "none", "n"]), owned(&[None, Some("non"), None]));
        assert_eq!(assign_shortcuts(&["a", "ab", "abc"]), owned(&[None, None, None]));
    }

    #[test]
    fn labels_render_with_bracketed_shortcut() {
        assert_eq!(format_label("override", Some("o")), "[o]verride");
        assert_eq!(format_label("yellow", Some("ye")), "[ye]llow");
        assert_eq!(format_label("n", None), "n");
    }

    #[derive(Debug, PartialEq)]
    enum Answer {
        Override,
        Cancel,
    }

    fn overwrite_menu() -> Menu<Answer> {
        Menu::new("file \"out.jpg\" does already exist. Do you want to override?")
            .option("override", Answer::Override)
            .option("cancel", Answer::Cancel)
    }

    #[test]
    fn choose_accepts_shortcut() {
        let mut p = prompter("c\n");
        assert_eq!(p.choose(overwrite_menu()).unwrap(), Answer::Cancel);

        let output = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(
            output,
            "file \"out.jpg\" does already exist. Do you want to override? ([o]verride, [c]ancel): "
        );
    }

    #[test]
    fn choose_accepts_full_label_and_trims() {
        let mut p = prompter("  override \n");
        assert_eq!(p.choose(overwrite_menu()).unwrap(), Answer::Override);
    }

    #[test]
    fn choose_reprompts_on_invalid_input() {
        let mut p = prompter("x\n\nOVERRIDE\no\n");
        assert_eq!(p.choose(overwrite_menu()).unwrap(), Answer::Override);

        let output = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(output.matches("Sorry, invalid choice.").count(), 3);
    }

    #[test]
    fn choose_fails_when_input_closes() {
        let mut p = prompter("maybe\n");
        assert!(matches!(p.choose(overwrite_menu()), Err(StitchError::InputClosed)));
    }

    #[test]
    fn list_choice_shows_aligned_indices() {
        let options: Vec<String> = (0..11).map(|i| format!("img{i}.png")).collect();
        let mut p = prompter("10\n");
        assert_eq!(p.choose_from_list(&options, "Please choose:").unwrap(), "img10.png");

        let output = String::from_utf8(p.into_output()).unwrap();
        assert!(output.starts_with("Please choose:\n"));
        assert!(output.contains("\n [0] img0.png\n"));
        assert!(output.contains("\n[10] img10.png\n"));
        assert!(output.ends_with("which one do you want to use? "));
    }

    #[test]
    fn list_choice_retries_until_in_range() {
        let options = vec!["a.jpg".to_string(), "b.jpg".to_string()];
        let mut p = prompter("-1\n2\nabc\n1\n");
        assert_eq!(p.choose_from_list(&options, "Pick").unwrap(), "b.jpg");

        let output = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(output.matches("Sorry, invalid choice. Try again:").count(), 3);
        assert_eq!(output.matches("[1] b.jpg").count(), 4);
    }

    #[test]
    fn empty_list_cannot_be_chosen_from() {
        let mut p = prompter("0\n");
        assert!(matches!(
            p.choose_from_list(&[], "Pick"),
            Err(StitchError::NothingToChoose(_))
        ));
    }
}
