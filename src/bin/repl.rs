use qlisp::{evaluator, parser, reader};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

fn main() {
    println!("QLisp Version 0.1.0");
    println!("Type expressions to evaluate them, or Ctrl+C to exit.");
    println!();

    let mut rl = DefaultEditor::new().unwrap();
    let mut env = evaluator::create_global_env();

    loop {
        match rl.readline("qlisp> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                match line {
                    ":help" => {
                        print_help();
                        continue;
                    }
                    ":env" => {
                        print_environment(&env);
                        continue;
                    }
                    ":quit" | ":exit" => {
                        println!("Goodbye!");
                        break;
                    }
                    _ => {}
                }

                match parser::parse(line) {
                    Ok(tree) => {
                        let result = evaluator::eval(&mut env, reader::read(&tree));
                        println!("{}", result);
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("Interrupted. Use Ctrl+D or :quit to exit.");
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
}

fn print_help() {
    println!("QLisp Commands:");
    println!("  :help    - Show this help message");
    println!("  :env     - Show current environment bindings");
    println!("  :quit    - Exit the interpreter");
    println!("  :exit    - Exit the interpreter");
    println!();
    println!("Language:");
    println!("  Numbers: 42, -2.5");
    println!("  S-expressions (evaluated eagerly): (+ 1 2)");
    println!("  Q-expressions (literal lists):     {{1 2 3}}");
    println!("  Arithmetic: + - * / ^");
    println!("  List operations: list, head, tail, join, eval, len, init");
    println!();
    println!("Examples:");
    println!("  (+ 2 3)");
    println!("  (head {{1 2 3}})");
    println!("  (eval (list + 2 3))");
}

fn print_environment(env: &qlisp::Environment) {
    let mut bindings: Vec<_> = env.bindings().collect();
    bindings.sort_by(|a, b| a.0.cmp(b.0));
    for (name, value) in bindings {
        println!("  {} => {}", name, value);
    }
}
