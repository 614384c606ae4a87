use std::io;
use tapeworm::{Interpreter, Program, Tape};

fn main() {
    // Classic Brainfuck "Hello World!" program
    let code = "++++++++++[>+++++++>++++++++++>+++>+<<<<-]>++.>+.+++++++..+++.>++.<<+++++++++++++++.>.+++.------.--------.>+.>.";

    let mut bf = Interpreter::new(Program::from(code), Tape::new(), io::empty(), io::stdout());

    if let Err(err) = bf.run() {
        eprintln!("Brainfuck interpreter error: {err}");
        std::process::exit(1);
    }

    // Tip: single-step to watch the tape instead of running to completion:
    // while bf.step()? == Step::Continue { println!("{:?}", &bf.tape().cells()[..5]); }
}
