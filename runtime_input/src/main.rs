use clap::{ArgAction, Parser, Subcommand};
use runtime_input::config::runtime::LogLevel;
use runtime_input::config::{LoggingPreferences, RuntimeConfig};
use runtime_input::expression::{
    get_input_str, parse_expression, ArgumentScan, FunctionSet, ParseOptions, RUNTIME_INPUT_VALUE,
};
use runtime_input::form::{
    validate_form_values, AllowedValuesType, ConfigureOptions, FormValues, ValidationKind,
};
use runtime_input::logging::{self, codes};
use runtime_input::{log_success, log_warning};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rtinput", version)]
#[command(about = "Decode and encode <+input> runtime input expressions")]
struct Cli {
    /// TOML runtime configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// -v for info, -vv for debug
    #[arg(long, short, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode an expression and print it as JSON
    Parse {
        expression: String,
        /// Accept only allowedValues and regex
        #[arg(long)]
        legacy: bool,
        /// Match argument parentheses by depth
        #[arg(long)]
        balanced: bool,
    },
    /// Build the canonical expression from field options
    Encode {
        #[arg(long)]
        execution_input: bool,
        #[arg(long)]
        default: Option<String>,
        /// Put the default inside the expression (overrides config)
        #[arg(long)]
        new_default_format: Option<bool>,
        #[arg(long = "allowed")]
        allowed: Vec<String>,
        #[arg(long, conflicts_with = "allowed")]
        jexl: Option<String>,
        #[arg(long)]
        regex: Option<String>,
        /// Run form checks before encoding
        #[arg(long)]
        validate: bool,
        /// Type of allowed values for --validate: text, number, time, url
        #[arg(long = "type", default_value = "text")]
        value_type: String,
    },
    /// Report which values are runtime inputs
    Check {
        #[arg(required = true)]
        values: Vec<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => RuntimeConfig::load_from_file(path),
        None => RuntimeConfig::from_env(),
    }
    .map_err(|e| {
        logging::safe_log_error(e.error_code(), &e.to_string());
        e
    })?;

    logging::config::init_runtime_preferences(logging_preferences(&cli, &config))?;
    logging::init_global_logging()?;

    match cli.command {
        Command::Parse {
            expression,
            legacy,
            balanced,
        } => {
            let mut options = config.codec.parse_options();
            if legacy {
                options.functions = FunctionSet::Legacy;
            }
            if balanced {
                options.argument_scan = ArgumentScan::Balanced;
            }
            run_parse(&expression, &options)
        }
        Command::Encode {
            execution_input,
            default,
            new_default_format,
            allowed,
            jexl,
            regex,
            validate,
            value_type,
        } => {
            let values = build_form_values(execution_input, default, allowed, jexl, regex);
            let mut options = config.codec.serialize_options();
            if let Some(enabled) = new_default_format {
                options.use_new_default_format = enabled;
            }

            if validate {
                let allowed_values_type = AllowedValuesType::from_name(&value_type)
                    .ok_or_else(|| format!("unknown allowed values type '{}'", value_type))?;
                let configure = ConfigureOptions {
                    allowed_values_type,
                    use_new_default_format: options.use_new_default_format,
                    ..ConfigureOptions::default()
                };
                if let Err(errors) = validate_form_values(&values, &configure) {
                    for error in errors {
                        eprintln!("error[{}]: {}", error.error_code(), error);
                    }
                    std::process::exit(1);
                }
            }

            let expression = get_input_str(&values, &options);
            log_success!(
                codes::success::EXPRESSION_SERIALIZED,
                "Expression encoded",
                "length" => expression.len()
            );
            println!("{}", expression);
            Ok(())
        }
        Command::Check { values } => {
            let options = config.codec.parse_options();
            for value in &values {
                println!("{}\t{}", classify(value, &options, config.codec.log_rejections), value);
            }
            Ok(())
        }
    }
}

fn logging_preferences(cli: &Cli, config: &RuntimeConfig) -> LoggingPreferences {
    let mut preferences = config.logging.clone();
    if cli.json_logs {
        preferences.use_structured_logging = true;
    }
    preferences.min_log_level = match cli.verbose {
        0 => preferences.min_log_level,
        1 => preferences.min_log_level.max(LogLevel::Info),
        _ => LogLevel::Debug,
    };
    preferences
}

fn run_parse(expression: &str, options: &ParseOptions) -> Result<(), Box<dyn std::error::Error>> {
    match parse_expression(expression, options) {
        Ok(parsed) => {
            log_success!(
                codes::success::EXPRESSION_PARSED,
                "Expression decoded",
                "execution_input" => parsed.execution_input
            );
            println!("{}", serde_json::to_string_pretty(&parsed)?);
            Ok(())
        }
        Err(error) => {
            eprint!("{}", error.render(expression));
            std::process::exit(1);
        }
    }
}

fn build_form_values(
    execution_input: bool,
    default: Option<String>,
    allowed: Vec<String>,
    jexl: Option<String>,
    regex: Option<String>,
) -> FormValues {
    let is_advanced = jexl.is_some();
    let advanced_value = jexl.unwrap_or_default();
    let regex_values = regex.unwrap_or_default();
    let validation = ValidationKind::derive(&allowed, &advanced_value, &regex_values);

    FormValues {
        is_execution_input: execution_input,
        validation,
        allowed_values: allowed,
        is_advanced,
        advanced_value,
        regex_values,
        default_value: default,
    }
}

fn classify(value: &str, options: &ParseOptions, log_rejections: bool) -> &'static str {
    match parse_expression(value, options) {
        Ok(parsed) if parsed.execution_input => "execution",
        Ok(_) => "runtime",
        Err(error) if error.is_foreign_value() => "fixed",
        Err(error) => {
            if log_rejections {
                log_warning!("Malformed runtime input",
                    "code" => error.error_code(),
                    "reason" => &error
                );
            }
            if value.starts_with(RUNTIME_INPUT_VALUE) {
                "invalid"
            } else {
                "fixed"
            }
        }
    }
}
