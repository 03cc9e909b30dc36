use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use sandbox_app::{Gateway, HttpGateway, Sandbox, SandboxConfig, Tab, ViewOutput};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;
use web4::{
    GatewayRequest, Session, SignField, SnippetFlavor, ViewCallRequest, params::parse_param_arg,
};

/// What one `view` or `sign` invocation produced
#[derive(Debug, Serialize)]
pub struct Report {
    pub url: String,
    pub try_it: Option<String>,
    pub query: String,
    pub params: Map<String, Value>,
    pub snippet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<ViewOutput>,
}

impl Report {
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        text.push_str("Generated URL:\n");
        text.push_str(&format!("{}\n", self.url));
        if let Some(try_it) = &self.try_it {
            text.push_str(&format!("Try it: {try_it}\n"));
        }
        text.push_str("\nCode Snippet:\n");
        text.push_str(&self.snippet);
        if let Some(output) = &self.output {
            text.push_str("\nView Output:\n");
            text.push_str(&format!("{output}\n"));
        }
        text
    }
}

fn sign_arg(field: SignField) -> Arg {
    let long = match field {
        SignField::ContractId => "contract-id",
        SignField::MethodName => "method-name",
        SignField::Args => "args",
        SignField::Gas => "gas",
        SignField::Deposit => "deposit",
        SignField::CallbackUrl => "callback-url",
    };
    Arg::new(field.as_str())
        .long(long)
        .value_name("VALUE")
        .help(format!("Sign field `{}`", field.as_str()))
}

fn snippet_arg() -> Arg {
    Arg::new("snippet")
        .short('s')
        .long("snippet")
        .value_name("FLAVOR")
        .help("Snippet flavor (js, curl)")
        .value_parser(SnippetFlavor::from_str)
        .default_value("js")
}

fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FORMAT")
        .help("Output format")
        .value_parser(["text", "json"])
        .default_value("text")
}

fn print_report(report: &Report, output_format: &str) -> Result<()> {
    match output_format {
        "json" => {
            let json_output = serde_json::to_string_pretty(report)
                .context("Failed to serialize output as JSON")?;
            println!("{json_output}");
        }
        _ => print!("{}", report.to_text()),
    }
    Ok(())
}

/// Fill the view form from `view` arguments and build the report,
/// fetching only when `--call` is given.
pub async fn view_report<G: Gateway>(sandbox: &mut Sandbox<G>, args: &ArgMatches) -> Result<Report> {
    let mut request = ViewCallRequest::new(
        args.get_one::<String>("contract").cloned().unwrap_or_default(),
        args.get_one::<String>("method").cloned().unwrap_or_default(),
    );
    if let Some(params) = args.get_many::<(String, String)>("param") {
        for (key, value) in params {
            request.params.push(key.clone(), value.clone());
        }
    }
    let encoded = request.encode();

    sandbox.select_tab(Tab::View);
    *sandbox.view_form_mut() = request.into();

    let output = if args.get_flag("call") {
        Some(sandbox.submit_view().await.clone())
    } else {
        sandbox.preview_view();
        None
    };

    let flavor = args
        .get_one::<SnippetFlavor>("snippet")
        .copied()
        .unwrap_or_default();

    Ok(Report {
        url: encoded.path,
        try_it: sandbox.try_it(),
        query: encoded.query,
        params: encoded.params,
        snippet: sandbox.snippet(flavor),
        output,
    })
}

/// Fill the sign form from `sign` arguments and build the report. The
/// redirect is printed, never followed.
pub fn sign_report<G: Gateway>(sandbox: &mut Sandbox<G>, args: &ArgMatches) -> Report {
    sandbox.select_tab(Tab::Sign);
    let form = sandbox.sign_form_mut();
    form.reset();
    for field in SignField::ALL {
        if let Some(value) = args.get_one::<String>(field.as_str()) {
            form.set(field, value.clone());
        }
    }
    let encoded = sandbox.state().sign_form.request().encode();
    let navigation = sandbox.submit_sign();

    let flavor = args
        .get_one::<SnippetFlavor>("snippet")
        .copied()
        .unwrap_or_default();

    Report {
        url: encoded.path,
        try_it: Some(navigation.url),
        query: encoded.query,
        params: encoded.params,
        snippet: sandbox.snippet(flavor),
        output: None,
    }
}

fn session_text<G: Gateway>(sandbox: &Sandbox<G>) -> String {
    let navigation = sandbox.session_navigation();
    let action = sandbox.session().action().label();
    match sandbox.session().account_id() {
        Some(account_id) => format!("Signed in as {account_id}\n{action}: {}\n", navigation.url),
        None => format!("Not signed in\n{action}: {}\n", navigation.url),
    }
}

/// app cli
pub struct Cli;
impl Cli {
    /// Command-line definition
    pub fn command() -> Command {
        Command::new("web4-sandbox")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Builds web4 gateway URLs for contract view calls and sign redirects")
            .subcommand_required(true)
            .arg(
                Arg::new("config")
                    .long("config")
                    .value_name("PATH")
                    .help("TOML configuration file")
                    .value_parser(clap::value_parser!(PathBuf))
                    .global(true),
            )
            .arg(
                Arg::new("gateway")
                    .short('g')
                    .long("gateway")
                    .value_name("URL")
                    .help("Gateway base URL (overrides config and WEB4_GATEWAY_URL)")
                    .global(true),
            )
            .arg(
                Arg::new("cookie")
                    .long("cookie")
                    .value_name("HEADER")
                    .help("Cookie header carrying web4_account_id")
                    .env("WEB4_COOKIE")
                    .global(true),
            )
            .subcommand(
                Command::new("view")
                    .about("Build (and optionally call) a contract view method URL")
                    .arg(
                        Arg::new("contract")
                            .short('c')
                            .long("contract")
                            .value_name("CONTRACT_ID")
                            .help("Contract account id")
                            .required(true),
                    )
                    .arg(
                        Arg::new("method")
                            .short('m')
                            .long("method")
                            .value_name("METHOD")
                            .help("View method name")
                            .required(true),
                    )
                    .arg(
                        Arg::new("param")
                            .short('p')
                            .long("param")
                            .value_name("KEY=VALUE")
                            .help("Method parameter; values starting with { or [ are sent as JSON")
                            .value_parser(parse_param_arg)
                            .action(ArgAction::Append),
                    )
                    .arg(
                        Arg::new("call")
                            .long("call")
                            .help("GET the URL and print the response body")
                            .action(ArgAction::SetTrue),
                    )
                    .arg(snippet_arg())
                    .arg(output_arg()),
            )
            .subcommand(
                Command::new("sign")
                    .about("Build a /web4/sign redirect URL")
                    .args(SignField::ALL.map(sign_arg))
                    .arg(snippet_arg())
                    .arg(output_arg()),
            )
            .subcommand(Command::new("login").about("Print the gateway login URL"))
            .subcommand(Command::new("logout").about("Print the gateway logout URL"))
            .subcommand(Command::new("session").about("Show who the cookie says is signed in"))
    }

    /// Parse the process arguments and run
    pub async fn execute() -> Result<()> {
        let matches = Self::command().get_matches();
        Self::run(&matches).await
    }

    /// Run already-parsed arguments
    pub async fn run(matches: &ArgMatches) -> Result<()> {
        // Global args propagate down, so the subcommand sees them wherever
        // they were written on the command line.
        let scope = matches.subcommand().map_or(matches, |(_, args)| args);

        let config_path = scope.get_one::<PathBuf>("config");
        let mut config = SandboxConfig::load(config_path.map(PathBuf::as_path))?;
        if let Some(gateway) = scope.get_one::<String>("gateway") {
            config = config.with_gateway_url(gateway.clone());
        }
        debug!("Using gateway {}", config.gateway_url);

        let session = scope
            .get_one::<String>("cookie")
            .map(|header| Session::from_cookie_header(header))
            .unwrap_or_default();
        let gateway = HttpGateway::from_config(&config)?;
        let mut sandbox = Sandbox::new(gateway, session);

        match matches.subcommand() {
            Some(("view", args)) => {
                let report = view_report(&mut sandbox, args).await?;
                print_report(&report, output_format(args))?;
            }
            Some(("sign", args)) => {
                let report = sign_report(&mut sandbox, args);
                print_report(&report, output_format(args))?;
            }
            Some(("login", _)) => println!("{}", sandbox.login().url),
            Some(("logout", _)) => println!("{}", sandbox.logout().url),
            Some(("session", _)) => print!("{}", session_text(&sandbox)),
            _ => unreachable!("subcommand_required is set"),
        }
        Ok(())
    }
}

fn output_format(args: &ArgMatches) -> &str {
    args.get_one::<String>("output")
        .map_or("text", String::as_str)
}
