//! Terminal riddle game with a chat side-session.
//!
//! # Usage
//!
//! ```bash
//! # Play with the built-in riddles
//! alghaz
//!
//! # Use your own riddles and a different endpoint
//! alghaz --riddles riddles.yaml --base-url http://localhost:8000/v1/
//!
//! # Log chat exchanges to stderr
//! alghaz --verbose
//! ```
//!
//! Type an answer to check it against the current riddle, `/next` for a new
//! riddle, `/chat` to talk to the assistant and `/back` to return.

use std::sync::Arc;

use arrrg::CommandLine;
use biometrics::Collector;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use alghaz::chat::ConversationSession;
use alghaz::commands::{GameCommand, help_text, parse_command};
use alghaz::config::{GameArgs, GameConfig};
use alghaz::observability;
use alghaz::{
    ChatClient, PlainTextRenderer, Renderer, RiddleSession, StderrLogger, register_biometrics,
};

/// How the chat loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChatExit {
    /// Back to the riddle.
    Back,
    /// Leave the application.
    Quit,
}

/// Main entry point for the alghaz game.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = GameArgs::from_command_line_relaxed("alghaz [OPTIONS]");
    let config = GameConfig::from(args);

    let collector = Collector::new();
    register_biometrics(&collector);

    let mut riddles = RiddleSession::new(config.load_bank()?);
    let mut renderer = PlainTextRenderer::with_color(config.use_color);
    let mut rl = DefaultEditor::new()?;

    println!("🎯 لعبة الألغاز");
    println!("Type /help for commands, /quit to exit\n");
    renderer.print_question(&riddles.current().question);

    loop {
        let readline = rl.readline("> ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        GameCommand::Next => {
                            let question = riddles.pick_random().question.clone();
                            renderer.print_question(&question);
                        }
                        GameCommand::Chat => match open_chat(&config) {
                            Ok(mut chat) => {
                                let exit = run_chat(&mut rl, &mut chat, &mut renderer).await?;
                                if exit == ChatExit::Quit {
                                    break;
                                }
                                renderer.print_info("Chat closed.");
                                renderer.print_question(&riddles.current().question);
                            }
                            Err(err) => {
                                renderer.print_error(&format!("Failed to open chat: {err}"));
                            }
                        },
                        GameCommand::Back | GameCommand::Clear => {
                            renderer.print_info("The chat is not open; use /chat to open it.");
                        }
                        GameCommand::Stats => {
                            let score = riddles.score();
                            println!("    Score:");
                            println!("      Correct: {}", score.correct);
                            println!("      Wrong: {}", score.wrong);
                            println!("      Riddles in bank: {}", riddles.bank().len());
                        }
                        GameCommand::Help => print_help(),
                        GameCommand::Quit => break,
                        GameCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                riddles.set_input(line);
                let verdict = riddles.check_input();
                renderer.print_verdict(&verdict);
            }
            Err(ReadlineError::Interrupted) => {
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    if config.verbose {
        let counters = observability::snapshot();
        eprintln!(
            "requests: {} ({} failed), riddles: {}, answers: {} correct / {} wrong",
            counters.requests,
            counters.request_errors,
            counters.riddles_picked,
            counters.answers_correct,
            counters.answers_wrong
        );
    }
    println!("Goodbye!");
    Ok(())
}

fn open_chat(config: &GameConfig) -> alghaz::Result<ConversationSession<ChatClient>> {
    let mut client = config.chat.build_client()?;
    if config.verbose {
        client = client.with_logger(Arc::new(StderrLogger));
    }
    Ok(ConversationSession::new(client, config.chat.clone()))
}

async fn run_chat(
    rl: &mut DefaultEditor,
    chat: &mut ConversationSession<ChatClient>,
    renderer: &mut PlainTextRenderer,
) -> Result<ChatExit, ReadlineError> {
    renderer.print_info("المحادثة مع الذكاء الاصطناعي (/back to return)\n");
    chat.open(renderer);

    loop {
        let readline = rl.readline("أنت> ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        GameCommand::Back => return Ok(ChatExit::Back),
                        GameCommand::Quit => return Ok(ChatExit::Quit),
                        GameCommand::Clear => {
                            chat.clear();
                            renderer.print_info("Conversation cleared.");
                        }
                        GameCommand::Stats => {
                            let stats = chat.stats();
                            println!("    Chat Statistics:");
                            println!("      Model: {}", stats.model);
                            println!(
                                "      Turns: {}/{}",
                                stats.turn_count, stats.history_limit
                            );
                            println!(
                                "      Requests: {} ({} failed)",
                                stats.total_requests, stats.failed_requests
                            );
                        }
                        GameCommand::Help => print_help(),
                        GameCommand::Next | GameCommand::Chat => {
                            renderer.print_info("Close the chat with /back first.");
                        }
                        GameCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                chat.submit(line, renderer).await;
            }
            Err(ReadlineError::Interrupted) => {
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => return Ok(ChatExit::Back),
            Err(err) => return Err(err),
        }
    }
}

fn print_help() {
    for line in help_text().lines() {
        println!("    {}", line);
    }
}
