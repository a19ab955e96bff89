use crate::{failure_line, header_line, render_report, AppState, Effect, Msg, FAREWELL};

const EXIT_COMMANDS: [&str; 2] = ["quit", "exit"];

/// True if `input` is one of the exit commands, ignoring case.
pub fn is_exit_command(input: &str) -> bool {
    EXIT_COMMANDS
        .iter()
        .any(|cmd| input.eq_ignore_ascii_case(cmd))
}

/// Pure update function: applies a message to state and returns any effects.
///
/// Messages that do not fit the current phase leave the state untouched and
/// produce no effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started if state.is_prompting() => vec![Effect::ShowPrompt],
        Msg::LineEntered(line) if state.is_prompting() => {
            if is_exit_command(&line) {
                state.exit();
                vec![Effect::Print(FAREWELL.to_string()), Effect::Exit]
            } else {
                let k = state.top_k();
                state.begin_query(line.clone());
                vec![Effect::RunQuery { url: line, k }]
            }
        }
        Msg::InputClosed if state.is_prompting() => {
            state.exit();
            vec![Effect::Exit]
        }
        Msg::QueryFinished { url, result } if state.is_processing(&url) => {
            state.finish_query();
            let mut effects = match result {
                Ok(entries) => render_report(&url, &entries)
                    .into_iter()
                    .map(Effect::Print)
                    .collect::<Vec<_>>(),
                Err(reason) => vec![
                    Effect::Print(failure_line(&url, &reason)),
                    Effect::Print(header_line(0, &url)),
                ],
            };
            effects.push(Effect::ShowPrompt);
            effects
        }
        _ => Vec::new(),
    };

    (state, effects)
}
