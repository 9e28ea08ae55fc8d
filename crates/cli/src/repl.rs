//! Line-oriented front-end over the controller.

use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;
use triage_core::controller::Controller;
use triage_core::models::{FileHandle, InputMode};

pub const HELP: &str = "\
Digite ou cole o email; cada linha é acrescentada ao texto.
  :mode text|file   alterna entre texto e arquivo
  :file CAMINHO     seleciona um arquivo (.txt ou .pdf, até 5MB)
  :cancel           desfaz a seleção de arquivo
  :submit           envia para classificação
  :new              nova classificação (limpa o formulário)
  :help             mostra esta ajuda
  :quit             sai";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Line(String),
    Mode(InputMode),
    File(PathBuf),
    Cancel,
    Submit,
    New,
    Help,
    Quit,
}

pub fn parse(line: &str) -> Result<Command, String> {
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Command::Line(line.to_string()));
    };
    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest.trim(), ""),
    };
    match name {
        "mode" => match arg {
            "text" | "texto" => Ok(Command::Mode(InputMode::Text)),
            "file" | "arquivo" => Ok(Command::Mode(InputMode::File)),
            other => Err(format!("modo desconhecido: {other:?}")),
        },
        "file" if arg.is_empty() => Err(":file precisa de um caminho".to_string()),
        "file" => Ok(Command::File(PathBuf::from(arg))),
        "cancel" => Ok(Command::Cancel),
        "submit" => Ok(Command::Submit),
        "new" => Ok(Command::New),
        "help" => Ok(Command::Help),
        "quit" | "q" => Ok(Command::Quit),
        other => Err(format!("comando desconhecido: :{other}")),
    }
}

/// Runs until `:quit` or end of input.
pub async fn run<R: AsyncBufRead + Unpin>(
    controller: &mut Controller,
    input: R,
) -> anyhow::Result<()> {
    println!("{}", HELP);
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse(&line) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{}", message);
                continue;
            }
        };
        if !apply(controller, command).await {
            break;
        }
    }
    Ok(())
}

/// Returns false when the session should end.
pub async fn apply(controller: &mut Controller, command: Command) -> bool {
    match command {
        Command::Line(line) => {
            let mut text = controller.view_model().text.clone();
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(&line);
            controller.set_text(text);
        }
        Command::Mode(mode) => controller.switch_mode(mode),
        Command::File(path) => match FileHandle::from_path(&path) {
            Ok(handle) => controller.select_file(Some(handle)),
            Err(e) => {
                warn!(path = %path.display(), "cannot open file: {}", e);
                eprintln!("Não foi possível abrir {}: {}", path.display(), e);
            }
        },
        Command::Cancel => controller.select_file(None),
        Command::Submit => {
            controller.submit().await;
        }
        Command::New => controller.reset(),
        Command::Help => println!("{}", HELP),
        Command::Quit => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_and_plain_lines() {
        assert_eq!(parse("Olá equipe,"), Ok(Command::Line("Olá equipe,".into())));
        assert_eq!(parse(":mode file"), Ok(Command::Mode(InputMode::File)));
        assert_eq!(parse(":mode  texto "), Ok(Command::Mode(InputMode::Text)));
        assert_eq!(
            parse(":file /tmp/pedido final.pdf"),
            Ok(Command::File(PathBuf::from("/tmp/pedido final.pdf")))
        );
        assert_eq!(parse(":submit"), Ok(Command::Submit));
        assert_eq!(parse(":q"), Ok(Command::Quit));
        assert!(parse(":file").is_err());
        assert!(parse(":mode audio").is_err());
        assert!(parse(":frobnicate").is_err());
    }
}
