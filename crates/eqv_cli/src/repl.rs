//! Interactive loop. A line containing `=` compares its two sides;
//! anything else is normalized and printed. Parse errors re-prompt.

use rustyline::error::ReadlineError;

use eqv_engine::Normalizer;

pub fn run() -> anyhow::Result<()> {
    let config = rustyline::Config::builder()
        .auto_add_history(true)
        .build();
    let mut editor = rustyline::DefaultEditor::with_config(config)?;
    let normalizer = Normalizer::new();
    let mut show_steps = false;

    println!("eqv — enter an expression, or 'lhs = rhs' to compare");
    println!("commands: :steps  toggle per-pass trace, :quit  exit");

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match line {
                    ":quit" | ":q" => break,
                    ":steps" => {
                        show_steps = !show_steps;
                        println!("steps {}", if show_steps { "on" } else { "off" });
                    }
                    _ => eval_line(&normalizer, line, show_steps),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

fn eval_line(normalizer: &Normalizer, line: &str, show_steps: bool) {
    if let Some((lhs, rhs)) = line.split_once('=') {
        match normalizer.are_equivalent(lhs, rhs) {
            Ok(true) => println!("equivalent"),
            Ok(false) => println!("not equivalent"),
            Err(e) => println!("error: {}", e),
        }
        return;
    }

    match eqv_parser::parse(line) {
        Ok(expr) => {
            println!("=> {}", expr);
            match normalizer.normalize_with_steps(&expr) {
                Ok((normal_form, steps)) => {
                    if show_steps {
                        for step in &steps {
                            println!("{:>16} => {}", step.pass, step.after);
                        }
                    }
                    println!("{}", normal_form);
                }
                Err(e) => println!("error: {}", e),
            }
        }
        Err(e) => println!("error: {}", e),
    }
}
