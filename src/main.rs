use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use qpx::codec;
use qpx::error::FlightError;
use qpx::fetch::{FetchOptions, DEFAULT_ENDPOINT};
use qpx::model::SearchResponse;
use qpx::query::{parse_carriers, parse_leg, Cabin, Passengers, SearchRequest, TimeWindow, TripSlice};
use qpx::table;
use qpx::FlightClient;

#[derive(Parser)]
#[command(
    name = "qpx",
    about = "Search QPX Express flight fares from the terminal",
    version,
    after_help = "\
Examples:
  qpx search -f JFK -t LAX -d 2026-04-01
  qpx search -f SFO -t NRT -d 2026-05-01 --return-date 2026-05-15 --cabin business
  qpx search --leg \"2026-03-01 LAX NRT\" --leg \"2026-03-10 NRT SEA\"
  qpx search -f BOS -t LHR -d 2026-06-01 --request
  qpx decode saved-response.json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    #[command(
        about = "Search for trip options",
        long_about = "Search for trip options between airports on specific dates.\n\
            Use -f/-t/-d for simple searches, or --leg for multi-city itineraries.",
        after_help = "\
Examples:
  One-way:      qpx search -f JFK -t LAX -d 2026-04-01
  Round-trip:   qpx search -f SFO -t NRT -d 2026-05-01 --return-date 2026-05-15
  Multi-city:   qpx search --leg \"2026-03-01 LAX NRT\" --leg \"2026-03-10 NRT SEA\"
  Nonstop:      qpx search -f BOS -t LHR -d 2026-06-01 --max-stops 0 --cabin first
  JSON output:  qpx search -f JFK -t LAX -d 2026-04-01 --json --pretty
  Dry run:      qpx search -f JFK -t LAX -d 2026-04-01 --request"
    )]
    Search(SearchArgs),

    #[command(about = "Decode a saved response body and render it")]
    Decode(DecodeArgs),

    #[command(about = "Run as an MCP server over stdio")]
    Mcp(ConnectionArgs),
}

#[derive(clap::Args)]
struct ConnectionArgs {
    #[arg(long, env = "QPX_API_KEY", hide_env_values = true, value_name = "KEY", help = "QPX Express API key")]
    api_key: Option<String>,

    #[arg(
        long,
        env = "QPX_ENDPOINT",
        default_value = DEFAULT_ENDPOINT,
        value_name = "URL",
        help = "trips/search endpoint"
    )]
    endpoint: String,

    #[arg(long, value_name = "URL", help = "HTTP or SOCKS5 proxy")]
    proxy: Option<String>,

    #[arg(long, default_value = "30", value_name = "SECS", help = "Request timeout")]
    timeout: u64,
}

impl ConnectionArgs {
    fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            endpoint: self.endpoint.clone(),
            proxy: self.proxy.clone(),
            timeout: self.timeout,
        }
    }
}

#[derive(clap::Args)]
struct SearchArgs {
    #[arg(short, long, value_name = "IATA", help = "Origin airport or city code")]
    from: Option<String>,

    #[arg(short, long, value_name = "IATA", help = "Destination airport or city code")]
    to: Option<String>,

    #[arg(short, long, value_name = "YYYY-MM-DD", help = "Departure date")]
    date: Option<String>,

    #[arg(
        long,
        value_name = "\"DATE FROM TO\"",
        help = "Trip slice (repeatable, for multi-city)",
        long_help = "Define a slice as \"YYYY-MM-DD FROM TO\". Repeat for multi-city \
            itineraries. Replaces -f/-t/-d when used.",
        num_args = 1
    )]
    leg: Vec<String>,

    #[arg(long, value_name = "YYYY-MM-DD", help = "Return date (adds a return slice)")]
    return_date: Option<String>,

    #[arg(long, default_value = "1", value_name = "N", help = "Number of adult passengers")]
    adults: u32,

    #[arg(long, default_value = "0", value_name = "N", help = "Number of child passengers")]
    children: u32,

    #[arg(long, default_value = "0", value_name = "N", help = "Number of senior passengers")]
    seniors: u32,

    #[arg(long, default_value = "0", value_name = "N", help = "Infants with own seat")]
    infants_in_seat: u32,

    #[arg(long, default_value = "0", value_name = "N", help = "Infants on adult's lap")]
    infants_on_lap: u32,

    #[arg(long, value_name = "CLASS", help = "Preferred cabin [economy, premium-economy, business, first]")]
    cabin: Option<String>,

    #[arg(long, value_name = "N", help = "Maximum stops per slice (0 = nonstop only)")]
    max_stops: Option<u32>,

    #[arg(long, value_name = "MINUTES", help = "Longest allowed connection")]
    max_connection: Option<u32>,

    #[arg(long, value_name = "HH:MM", help = "Earliest departure time of day")]
    earliest: Option<String>,

    #[arg(long, value_name = "HH:MM", help = "Latest departure time of day")]
    latest: Option<String>,

    #[arg(long, value_name = "AA,DL,...", help = "Only these carriers (comma-separated)")]
    carriers: Option<String>,

    #[arg(long, value_name = "UA,...", help = "Exclude these carriers (comma-separated)")]
    exclude_carriers: Option<String>,

    #[arg(long, value_name = "PRICE", help = "Price cap with currency prefix (e.g. USD500)")]
    max_price: Option<String>,

    #[arg(long, value_name = "CC", help = "Two-letter sale country (e.g. US)")]
    sale_country: Option<String>,

    #[arg(long, help = "Refundable fares only")]
    refundable: bool,

    #[arg(long, value_name = "N", help = "Maximum number of trip options")]
    solutions: Option<u32>,

    #[arg(long, help = "Print the request body instead of sending it")]
    request: bool,

    #[arg(long, help = "Output as JSON")]
    json: bool,

    #[arg(long, help = "Output as pretty-printed JSON")]
    pretty: bool,

    #[command(flatten)]
    connection: ConnectionArgs,
}

#[derive(clap::Args)]
struct DecodeArgs {
    #[arg(value_name = "FILE", help = "Path to a saved trips/search response body")]
    file: PathBuf,

    #[arg(long, help = "Output as JSON")]
    json: bool,

    #[arg(long, help = "Output as pretty-printed JSON")]
    pretty: bool,
}

fn die(err: &FlightError, json_mode: bool) -> ! {
    if json_mode {
        let json = serde_json::json!({
            "error": {
                "kind": err.kind(),
                "message": err.to_string(),
            }
        });
        println!("{json}");
    } else {
        eprintln!("error: {err}");
    }
    process::exit(err.exit_code());
}

fn build_slices(args: &SearchArgs) -> Result<Vec<TripSlice>, FlightError> {
    if !args.leg.is_empty() {
        return args.leg.iter().map(String::as_str).map(parse_leg).collect();
    }

    let from = args
        .from
        .as_ref()
        .ok_or_else(|| FlightError::Validation("--from is required (or use --leg)".into()))?
        .to_uppercase();
    let to = args
        .to
        .as_ref()
        .ok_or_else(|| FlightError::Validation("--to is required (or use --leg)".into()))?
        .to_uppercase();
    let date = args
        .date
        .as_ref()
        .ok_or_else(|| FlightError::Validation("--date is required (or use --leg)".into()))?;

    let outbound = TripSlice::new(&from, &to, date);
    let mut slices = vec![outbound.clone()];
    if let Some(ref ret) = args.return_date {
        slices.push(outbound.reversed(ret));
    }
    Ok(slices)
}

fn build_request(args: &SearchArgs) -> Result<SearchRequest, FlightError> {
    let mut slices = build_slices(args)?;

    let cabin = args.cabin.as_deref().map(Cabin::from_str_loose).transpose()?;
    let permitted = args.carriers.as_deref().map(parse_carriers).unwrap_or_default();
    let prohibited = args
        .exclude_carriers
        .as_deref()
        .map(parse_carriers)
        .unwrap_or_default();
    let window = (args.earliest.is_some() || args.latest.is_some())
        .then(|| TimeWindow::new(args.earliest.as_deref(), args.latest.as_deref()));

    for slice in &mut slices {
        slice.max_stops = args.max_stops;
        slice.max_connection_duration = args.max_connection;
        slice.preferred_cabin = cabin;
        slice.permitted_departure_time = window.clone();
        slice.permitted_carrier = permitted.clone();
        slice.prohibited_carrier = prohibited.clone();
    }

    let mut request = SearchRequest::new(slices);
    request.passengers = Passengers {
        adult_count: args.adults,
        child_count: args.children,
        senior_count: args.seniors,
        infant_in_seat_count: args.infants_in_seat,
        infant_in_lap_count: args.infants_on_lap,
        ..Passengers::adults(0)
    };
    request.max_price = args.max_price.clone();
    request.sale_country = args.sale_country.clone();
    request.refundable = args.refundable.then_some(true);
    request.solutions = args.solutions;

    Ok(request)
}

fn print_response(response: &SearchResponse, json: bool, pretty: bool) -> Result<(), FlightError> {
    if json || pretty {
        let output = if pretty {
            serde_json::to_string_pretty(response)
        } else {
            serde_json::to_string(response)
        }
        .map_err(|e| FlightError::Encode(e.to_string()))?;
        println!("{output}");
        return Ok(());
    }

    if let Some(ref err) = response.error {
        eprintln!("warning: API reported error {}: {}", err.code, err.message);
    }
    if response.is_empty() {
        println!("No trip options found.");
        return Ok(());
    }
    if !response.trips.request_id.is_empty() {
        println!("Request {}", response.trips.request_id);
    }
    let travellers = response.trips.passengers.total();
    if travellers > 0 {
        println!("{travellers} passenger(s)");
    }
    println!("{}", table::render(response));
    Ok(())
}

async fn run_search(args: &SearchArgs) -> Result<(), FlightError> {
    let request = build_request(args)?;

    if args.request {
        println!("{}", codec::encode_pretty(&request)?);
        return Ok(());
    }

    let api_key = args
        .connection
        .api_key
        .as_deref()
        .filter(|k| !k.is_empty())
        .ok_or(FlightError::MissingApiKey)?;

    let client = FlightClient::new(api_key, &args.connection.fetch_options())?;
    let response = client.search(&request).await?;
    print_response(&response, args.json, args.pretty)
}

fn run_decode(args: &DecodeArgs) -> Result<(), FlightError> {
    let body = std::fs::read(&args.file).map_err(|e| {
        FlightError::Validation(format!("cannot read {}: {e}", args.file.display()))
    })?;
    let response = codec::decode(&body)?;
    print_response(&response, args.json, args.pretty)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Search(args) => {
            let json_mode = args.json || args.pretty;
            if let Err(e) = run_search(&args).await {
                die(&e, json_mode);
            }
        }
        Commands::Decode(args) => {
            let json_mode = args.json || args.pretty;
            if let Err(e) = run_decode(&args) {
                die(&e, json_mode);
            }
        }
        Commands::Mcp(conn) => {
            if let Err(e) = qpx::mcp::run(conn.api_key.clone(), conn.fetch_options()).await {
                eprintln!("error: MCP server failed: {e}");
                process::exit(1);
            }
        }
    }
}
