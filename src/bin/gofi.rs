use std::env;

fn print_usage() {
    eprintln!("Usage: gofi [MODE] [OPTIONS] <share-url>");
    eprintln!();
    eprintln!("Modes:");
    eprintln!("  --api                Run the token-proxy server instead of downloading");
    eprintln!("  (default)            Preview and download the given share link");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output <DIR>   Download directory (default: current directory)");
    eprintln!("  -p, --password <PW>  Password for protected folders");
    eprintln!("  -s, --select <IDS>   Comma-separated file ids to download");
    eprintln!("  -l, --list           List files without downloading");
    eprintln!("  -f, --force          Overwrite existing files");
    eprintln!("      --api-host <H>   Token-proxy bind address (default: 127.0.0.1)");
    eprintln!("      --api-port <P>   Token-proxy port (default: 9724)");
    eprintln!("  -h, --help           Show this help");
}

#[tokio::main]
async fn main() -> gofile_dl::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        print_usage();
        std::process::exit(1);
    }
    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage();
        std::process::exit(0);
    }

    // Pull out the mode and server flags; everything else goes to CLI parsing.
    let mut api = false;
    let mut api_host: Option<String> = None;
    let mut api_port: Option<u16> = None;
    let mut rest: Vec<String> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--api" => api = true,
            "--api-host" => {
                i += 1;
                let Some(value) = args.get(i) else {
                    eprintln!("Error: --api-host requires a value");
                    std::process::exit(1);
                };
                api_host = Some(value.clone());
            }
            "--api-port" => {
                i += 1;
                let Some(value) = args.get(i) else {
                    eprintln!("Error: --api-port requires a value");
                    std::process::exit(1);
                };
                match value.parse() {
                    Ok(port) => api_port = Some(port),
                    Err(_) => {
                        eprintln!("Error: --api-port must be a port number");
                        std::process::exit(1);
                    }
                }
            }
            other => rest.push(other.to_string()),
        }
        i += 1;
    }

    let mut config = gofile_dl::AppConfig::load()?;
    if let Some(host) = api_host {
        config.api.host = host;
    }
    if let Some(port) = api_port {
        config.api.port = port;
    }

    if api {
        #[cfg(feature = "api")]
        {
            return gofile_dl::api::run_standalone(&config.api).await;
        }
        #[cfg(not(feature = "api"))]
        {
            eprintln!("token-proxy support not compiled in");
            std::process::exit(1);
        }
    }

    #[cfg(feature = "cli")]
    {
        match gofile_dl::cli::parse_args(&rest) {
            Ok(parsed) => gofile_dl::cli::run(config, parsed).await,
            Err(message) => {
                eprintln!("Error: {message}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
    #[cfg(not(feature = "cli"))]
    {
        let _ = rest;
        eprintln!("CLI support not compiled in");
        std::process::exit(1);
    }
}
