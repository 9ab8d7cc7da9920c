use crate::driver::{report_parse_error, PrintingCaseSplit};
use kernel::ast::Term;
use kernel::env::{Env, Globals};
use kernel::parser::{self, Parser};
use kernel::state::EvalState;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fs;
use std::rc::Rc;
use tactics::induct::{induct_on_call, Goal};

pub fn start() {
    let mut rl = DefaultEditor::new().expect("Failed to init readline");
    if rl.load_history("history.txt").is_err() {
        // No history yet
    }

    let mut globals = Globals::new();
    let mut goal: Option<Rc<Term>> = None;

    println!("induct REPL");
    println!("Type :help for commands, :quit or Ctrl-D to leave.");

    loop {
        let readline = rl.readline("induct> ");
        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                if let Some(rest) = line.strip_prefix(':') {
                    let mut parts = rest.splitn(2, char::is_whitespace);
                    let command = parts.next().unwrap_or("");
                    let tail = parts.next().unwrap_or("").trim();
                    match command {
                        "quit" | "exit" => break,
                        "help" => {
                            println!("Available commands:");
                            println!("  :quit, :exit          Leave the session");
                            println!("  :help                 Show this help message");
                            println!("  :load <file>          Load a definition script");
                            println!("  :goal <term>          Set the current goal conclusion");
                            println!("  :induct <fn> <arg>*   Induct on an occurrence of (fn args)");
                            println!("Any other input is read as script items, e.g. (def ...)");
                        }
                        "load" => {
                            if tail.is_empty() {
                                println!("Usage: :load <file>");
                            } else {
                                load_file(tail, &mut globals, &mut goal);
                            }
                        }
                        "goal" => match parser::term(tail) {
                            Ok(term) => {
                                println!("goal set: {}", term);
                                goal = Some(term);
                            }
                            Err(err) => report_parse_error("<repl>", tail, &err),
                        },
                        "induct" => run_induct(tail, &globals, &goal),
                        other => println!("Unknown command :{} (try :help)", other),
                    }
                } else {
                    ingest_items(line, &mut globals, &mut goal);
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    let _ = rl.save_history("history.txt");
}

fn load_file(path: &str, globals: &mut Globals, goal: &mut Option<Rc<Term>>) {
    match fs::read_to_string(path) {
        Ok(source) => {
            println!("Loading {}...", path);
            ingest_source(path, &source, globals, goal);
        }
        Err(err) => println!("Failed to read {}: {}", path, err),
    }
}

fn ingest_items(line: &str, globals: &mut Globals, goal: &mut Option<Rc<Term>>) {
    ingest_source("<repl>", line, globals, goal);
}

fn ingest_source(
    filename: &str,
    source: &str,
    globals: &mut Globals,
    goal: &mut Option<Rc<Term>>,
) {
    match parser::script(source) {
        Ok(script) => {
            for def in script.globals.definitions() {
                globals.add_definition(def.clone());
            }
            if let Some(concl) = script.goal {
                println!("goal set: {}", concl);
                *goal = Some(concl);
            }
        }
        Err(err) => report_parse_error(filename, source, &err),
    }
}

fn run_induct(tail: &str, globals: &Globals, goal: &Option<Rc<Term>>) {
    let Some(concl) = goal else {
        println!("No goal set; use :goal or (goal ...) first");
        return;
    };
    let terms = match Parser::new(tail).parse_terms() {
        Ok(terms) => terms,
        Err(err) => {
            report_parse_error("<repl>", tail, &err);
            return;
        }
    };
    let Some((target_fn, target_args)) = terms.split_first() else {
        println!("Usage: :induct <fn> <arg>*");
        return;
    };
    let goal = Goal::new(Env::new(Rc::new(globals.clone())), concl.clone());
    match induct_on_call(
        EvalState::new(),
        &goal,
        target_fn,
        target_args,
        &mut PrintingCaseSplit,
    ) {
        Ok(_) => {}
        Err(err) => println!("Tactic failed: {}", err),
    }
}
