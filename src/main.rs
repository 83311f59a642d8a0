use std::{
    fs,
    path::{Path, PathBuf},
    process,
};

use clap::Parser as _;
use tracing::{error, info};

use zfx::{
    bytecode::{
        CompileOptions, Compiler, Program,
        compile::Passes,
        disasm::print_bc,
    },
    frontend::{lexer::Lexer, token_dumper::TokenDumper},
};

#[derive(clap::Parser, Debug)]
#[command(name = "zfx")]
#[command(about = "Compile zfx field expressions to register bytecode")]
struct Args {
    /// Source file to compile
    #[arg(required_unless_present = "load")]
    file: Option<PathBuf>,

    /// Show tokens only
    #[arg(long)]
    tokens: bool,

    /// Disable ANSI colors in the token dump
    #[arg(long)]
    no_color: bool,

    /// Print token lexemes instead of their debug form
    #[arg(long)]
    pretty: bool,

    /// Print the syntax tree and stop
    #[arg(long)]
    ast: bool,

    /// Print IR nodes, registers and dependency edges and stop
    #[arg(long)]
    ir: bool,

    /// Treat dropped input as an error
    #[arg(long)]
    strict: bool,

    /// Write the compiled program to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Disassemble a program previously written with --output
    #[arg(long, conflicts_with = "file")]
    load: Option<PathBuf>,
}

fn main() {
    zfx::logging::init_logging();

    let args = Args::parse();

    if let Some(path) = &args.load {
        load_program(path);
        return;
    }

    // clap guarantees one of `file` / `load`
    let Some(filename) = &args.file else {
        process::exit(2);
    };

    let source = match fs::read_to_string(filename) {
        Ok(source) => source,
        Err(e) => {
            error!("Failed to read '{}': {}", filename.display(), e);
            process::exit(1);
        }
    };

    if args.tokens {
        dump_tokens(&source, args.no_color, args.pretty);
    } else {
        run_program(&source, &args);
    }
}

fn dump_tokens(source: &str, no_color: bool, pretty: bool) {
    let mut lexer = Lexer::new(source);

    match lexer.tokenize() {
        Ok(tokens) => {
            let mut dumper = TokenDumper::new();

            if no_color {
                dumper = dumper.no_color();
            }
            if pretty {
                dumper = dumper.pretty();
            }

            dumper.dump(&tokens);

            if let Some(stop) = lexer.truncation() {
                println!(
                    "[{:02}:{:02}] stopped at {:?}",
                    stop.span.line, stop.span.col, stop.found
                );
            }
        }
        Err(e) => {
            error!("Lexer error: {}", e);
            process::exit(1);
        }
    }
}

fn run_program(source: &str, args: &Args) {
    let options = CompileOptions {
        deny_warnings: args.strict,
    };

    // Inspection modes stop before emission
    if args.ast || args.ir {
        let passes = match Compiler::with_options(options).analyze(source) {
            Ok(passes) => passes,
            Err(e) => {
                error!("Compile error: {}", e);
                process::exit(1);
            }
        };
        if args.ast {
            println!("{}", passes.ast);
        } else {
            print_ir(&passes);
        }
        return;
    }

    let compiled = match Compiler::with_options(options).compile(source) {
        Ok(compiled) => compiled,
        Err(e) => {
            error!("Compile error: {}", e);
            process::exit(1);
        }
    };

    if !compiled.warnings.is_empty() {
        info!("{} warning(s)", compiled.warnings.len());
    }

    if let Some(path) = &args.output {
        write_program(&compiled.program, path);
    }

    if let Err(e) = print_bc(&compiled.program) {
        error!("Disassembly error: {}", e);
        process::exit(1);
    }
}

fn print_ir(passes: &Passes) {
    for (id, node) in passes.ir.iter() {
        let reg = passes
            .regs
            .get(id)
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:<5} {:<5} {}", id.to_string(), reg, node);
    }

    println!();
    for (consumer, operand) in passes.deps.edges() {
        println!("{} -> {}", consumer, operand);
    }
}

fn write_program(program: &Program, path: &Path) {
    let encoded = match program.to_bytes() {
        Ok(data) => data,
        Err(e) => {
            error!("Failed to encode program: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = fs::write(path, encoded) {
        error!("Failed to write {}: {}", path.display(), e);
        process::exit(1);
    }

    info!("Wrote program to {}", path.display());
}

fn load_program(path: &Path) {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Failed to read '{}': {}", path.display(), e);
            process::exit(1);
        }
    };

    let program = match Program::from_bytes(&bytes) {
        Ok(program) => program,
        Err(e) => {
            error!("Failed to decode {}: {}", path.display(), e);
            process::exit(1);
        }
    };

    if let Err(e) = print_bc(&program) {
        error!("Disassembly error: {}", e);
        process::exit(1);
    }
}
