//! Response records for `trips/search`.
//!
//! Every struct decodes leniently: unknown properties are ignored and missing
//! ones fall back to `Default`. Sequences keep the order the API sent them in.

use serde::{Deserialize, Deserializer, Serialize};

use crate::query::Passengers;

/// Reads an explicit `null` as the field's default, the same as a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct City {
    #[serde(deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Airport {
    #[serde(deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Aircraft {
    #[serde(deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Carrier {
    #[serde(deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Tax {
    #[serde(deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub charge_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sale_price: String,
}

/// Reference data shared by every trip option in a response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TripData {
    #[serde(deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub airport: Vec<Airport>,
    #[serde(deserialize_with = "null_as_default")]
    pub city: Vec<City>,
    #[serde(deserialize_with = "null_as_default")]
    pub aircraft: Vec<Aircraft>,
    #[serde(deserialize_with = "null_as_default")]
    pub tax: Vec<Tax>,
    #[serde(deserialize_with = "null_as_default")]
    pub carrier: Vec<Carrier>,
}

impl TripData {
    pub fn airport(&self, code: &str) -> Option<&Airport> {
        self.airport.iter().find(|a| a.code == code)
    }

    pub fn city(&self, code: &str) -> Option<&City> {
        self.city.iter().find(|c| c.code == code)
    }

    pub fn aircraft(&self, code: &str) -> Option<&Aircraft> {
        self.aircraft.iter().find(|a| a.code == code)
    }

    pub fn carrier(&self, code: &str) -> Option<&Carrier> {
        self.carrier.iter().find(|c| c.code == code)
    }

    pub fn tax(&self, id: &str) -> Option<&Tax> {
        self.tax.iter().find(|t| t.id == id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Fare {
    #[serde(deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub carrier: String,
    #[serde(deserialize_with = "null_as_default")]
    pub origin: String,
    #[serde(deserialize_with = "null_as_default")]
    pub destination: String,
    #[serde(deserialize_with = "null_as_default")]
    pub basis_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub private: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pricing {
    #[serde(deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub fare: Vec<Fare>,
    #[serde(deserialize_with = "null_as_default")]
    pub segment_pricing: Vec<SegmentPricing>,
    #[serde(deserialize_with = "null_as_default")]
    pub base_fare_total: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sale_fare_total: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sale_tax_total: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sale_total: String,
    #[serde(deserialize_with = "null_as_default")]
    pub passengers: Passengers,
    #[serde(deserialize_with = "null_as_default")]
    pub tax: Vec<Tax>,
    #[serde(deserialize_with = "null_as_default")]
    pub fare_calculation: String,
    #[serde(deserialize_with = "null_as_default")]
    pub latest_ticketing_time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ptc: String,
    #[serde(deserialize_with = "null_as_default")]
    pub refundable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BagDescriptor {
    #[serde(deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub commercial_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub count: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub description: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub subcode: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FreeBaggageOption {
    #[serde(deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bag_descriptor: Vec<BagDescriptor>,
    #[serde(deserialize_with = "null_as_default")]
    pub kilos: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub kilos_per_piece: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub pieces: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub pounds: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SegmentPricing {
    #[serde(deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub fare_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub segment_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub free_baggage_option: Vec<FreeBaggageOption>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlightNumber {
    #[serde(deserialize_with = "null_as_default")]
    pub carrier: String,
    #[serde(deserialize_with = "null_as_default")]
    pub number: String,
}

impl std::fmt::Display for FlightNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.carrier, self.number)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Leg {
    #[serde(deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub aircraft: String,
    #[serde(deserialize_with = "null_as_default")]
    pub arrival_time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub departure_time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub origin: String,
    #[serde(deserialize_with = "null_as_default")]
    pub destination: String,
    #[serde(deserialize_with = "null_as_default")]
    pub origin_terminal: String,
    #[serde(deserialize_with = "null_as_default")]
    pub destination_terminal: String,
    #[serde(deserialize_with = "null_as_default")]
    pub duration: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub operating_disclosure: String,
    #[serde(deserialize_with = "null_as_default")]
    pub on_time_performance: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub mileage: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub meal: String,
    #[serde(deserialize_with = "null_as_default")]
    pub secure: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub connection_duration: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub change_plane: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Segment {
    #[serde(deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub duration: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub flight: FlightNumber,
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cabin: String,
    #[serde(deserialize_with = "null_as_default")]
    pub booking_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub booking_code_count: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub married_segment_group: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subject_to_government_approval: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub leg: Vec<Leg>,
    #[serde(deserialize_with = "null_as_default")]
    pub connection_duration: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponseSlice {
    #[serde(deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub duration: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub segment: Vec<Segment>,
}

impl ResponseSlice {
    pub fn origin(&self) -> Option<&str> {
        self.segment
            .first()
            .and_then(|s| s.leg.first())
            .map(|l| l.origin.as_str())
    }

    pub fn destination(&self) -> Option<&str> {
        self.segment
            .last()
            .and_then(|s| s.leg.last())
            .map(|l| l.destination.as_str())
    }

    pub fn stops(&self) -> usize {
        self.segment.len().saturating_sub(1)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TripOption {
    #[serde(deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sale_total: String,
    #[serde(deserialize_with = "null_as_default")]
    pub slice: Vec<ResponseSlice>,
    #[serde(deserialize_with = "null_as_default")]
    pub pricing: Vec<Pricing>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Trips {
    #[serde(deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub request_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub data: TripData,
    #[serde(deserialize_with = "null_as_default")]
    pub trip_option: Vec<TripOption>,
    #[serde(deserialize_with = "null_as_default")]
    pub pricing: Vec<Pricing>,
    #[serde(deserialize_with = "null_as_default")]
    pub segment_pricing: Vec<SegmentPricing>,
    #[serde(deserialize_with = "null_as_default")]
    pub base_fare_total: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sale_fare_total: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sale_tax_total: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sale_total: String,
    #[serde(deserialize_with = "null_as_default")]
    pub passengers: Passengers,
    #[serde(deserialize_with = "null_as_default")]
    pub tax: Vec<Tax>,
    #[serde(deserialize_with = "null_as_default")]
    pub fare_calculation: String,
    #[serde(deserialize_with = "null_as_default")]
    pub latest_ticketing_time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ptc: String,
    #[serde(deserialize_with = "null_as_default")]
    pub refundable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiErrorDetail {
    #[serde(deserialize_with = "null_as_default")]
    pub domain: String,
    #[serde(deserialize_with = "null_as_default")]
    pub reason: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
}

/// In-band error payload the API sends alongside a non-success status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiError {
    #[serde(deserialize_with = "null_as_default")]
    pub code: u16,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub trips: Trips,
    #[serde(deserialize_with = "null_as_default")]
    pub slice: Vec<ResponseSlice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl SearchResponse {
    pub fn is_empty(&self) -> bool {
        self.slice.is_empty() && self.trips.trip_option.is_empty()
    }
}
