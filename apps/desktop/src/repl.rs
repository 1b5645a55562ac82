use client_core::{FormSubmitEvent, UiAction};

pub const HELP: &str = "\
commands:
  toggle            switch between light and dark mode
  + | inc           increment the counter
  - | dec           decrement the counter
  load              load users (may overlap with a running load)
  submit k=v ...    submit the demo form
  help              show this help
  quit | exit       leave";

#[derive(Debug)]
pub enum ReplInput {
    Action(UiAction),
    Help,
    Quit,
    Empty,
}

pub fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok((name.to_string(), value.to_string()))
}

pub fn parse_line(line: &str) -> Result<ReplInput, String> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(ReplInput::Empty);
    };

    let input = match command {
        "toggle" | "theme" => ReplInput::Action(UiAction::ToggleTheme),
        "+" | "inc" | "increment" => ReplInput::Action(UiAction::Increment),
        "-" | "dec" | "decrement" => ReplInput::Action(UiAction::Decrement),
        "load" | "users" => ReplInput::Action(UiAction::LoadUsers),
        "submit" => {
            let fields = words.map(parse_field).collect::<Result<Vec<_>, _>>()?;
            ReplInput::Action(UiAction::SubmitForm(FormSubmitEvent::new(fields)))
        }
        "help" | "?" => ReplInput::Help,
        "quit" | "exit" => ReplInput::Quit,
        other => return Err(format!("unknown command '{other}'; try 'help'")),
    };
    Ok(input)
}
