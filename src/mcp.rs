use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::schemars;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::FlightError;
use crate::fetch::FetchOptions;
use crate::query::{parse_carriers, Cabin, Passengers, SearchRequest};

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct SearchArgs {
    #[schemars(description = "Origin airport or city IATA code. Example: JFK, SFO, LON")]
    from: String,
    #[schemars(description = "Destination airport or city IATA code. Example: LAX, NRT")]
    to: String,
    #[schemars(description = "Departure date in YYYY-MM-DD format. Example: 2026-03-01")]
    date: String,
    #[schemars(description = "Return date in YYYY-MM-DD. Adds a return slice")]
    return_date: Option<String>,
    #[schemars(description = "One of: economy, premium-economy, business, first")]
    cabin: Option<String>,
    #[schemars(description = "Maximum stops per slice. 0 = nonstop only")]
    max_stops: Option<u32>,
    #[schemars(description = "Only these carriers, comma-separated IATA codes. Example: AA,DL")]
    carriers: Option<String>,
    #[schemars(description = "Adult passengers. Default: 1")]
    adults: Option<u32>,
    #[schemars(description = "Child passengers. Default: 0")]
    children: Option<u32>,
    #[schemars(description = "Senior passengers. Default: 0")]
    seniors: Option<u32>,
    #[schemars(description = "Price cap with currency prefix. Example: USD500")]
    max_price: Option<String>,
    #[schemars(description = "Two-letter sale country. Example: US")]
    sale_country: Option<String>,
    #[schemars(description = "Maximum number of trip options to return")]
    solutions: Option<u32>,
}

fn build_request(args: SearchArgs) -> Result<SearchRequest, FlightError> {
    let from = args.from.to_uppercase();
    let to = args.to.to_uppercase();

    let mut request = match args.return_date {
        Some(ref ret) => SearchRequest::round_trip(&from, &to, &args.date, ret),
        None => SearchRequest::one_way(&from, &to, &args.date),
    };

    let cabin = args.cabin.as_deref().map(Cabin::from_str_loose).transpose()?;
    let carriers = args.carriers.as_deref().map(parse_carriers).unwrap_or_default();

    for slice in &mut request.slice {
        slice.max_stops = args.max_stops;
        slice.preferred_cabin = cabin;
        slice.permitted_carrier = carriers.clone();
    }

    request.passengers = Passengers {
        adult_count: args.adults.unwrap_or(1),
        child_count: args.children.unwrap_or(0),
        senior_count: args.seniors.unwrap_or(0),
        ..Passengers::adults(0)
    };
    request.max_price = args.max_price;
    request.sale_country = args.sale_country;
    request.solutions = args.solutions;

    Ok(request)
}

fn tool_error(msg: impl Into<String>) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::error(vec![Content::text(msg.into())]))
}

#[derive(Debug, Clone)]
struct QpxMcp {
    tool_router: ToolRouter<Self>,
    api_key: Option<String>,
    options: FetchOptions,
}

#[tool_router]
impl QpxMcp {
    fn new(api_key: Option<String>, options: FetchOptions) -> Self {
        Self {
            tool_router: Self::tool_router(),
            api_key,
            options,
        }
    }

    #[tool(
        description = "Search QPX Express for trip options and return the decoded response as JSON. Builds a one-way search, or a round trip when return_date is given. The response keeps slices, segments and legs in itinerary order, with airport, city, carrier and tax reference data under trips.data. If the API reports a problem it appears under the top-level 'error' field."
    )]
    async fn qpx_search(
        &self,
        Parameters(args): Parameters<SearchArgs>,
    ) -> Result<CallToolResult, McpError> {
        let Some(ref api_key) = self.api_key else {
            return tool_error(FlightError::MissingApiKey.to_string());
        };

        let request = match build_request(args) {
            Ok(r) => r,
            Err(e) => return tool_error(e.to_string()),
        };

        match crate::search(api_key, &request, &self.options).await {
            Ok(response) => match serde_json::to_string_pretty(&response) {
                Ok(json) => Ok(CallToolResult::success(vec![Content::text(json)])),
                Err(e) => tool_error(e.to_string()),
            },
            Err(e) => {
                warn!(kind = e.kind(), "qpx_search failed");
                tool_error(e.to_string())
            }
        }
    }
}

#[tool_handler]
impl ServerHandler for QpxMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "qpx".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Flight fare search backed by QPX Express. Call qpx_search with IATA codes and YYYY-MM-DD dates. Prices are strings with a currency prefix, e.g. USD612.10.".into(),
            ),
        }
    }
}

pub async fn run(
    api_key: Option<String>,
    options: FetchOptions,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if api_key.is_none() {
        warn!("starting MCP server without an API key; searches will fail");
    }
    info!(endpoint = %options.endpoint, "starting MCP server on stdio");

    let service = QpxMcp::new(api_key, options)
        .serve(rmcp::transport::stdio())
        .await?;
    service.waiting().await?;
    Ok(())
}
