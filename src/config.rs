use std::{
	net::{IpAddr, Ipv4Addr},
	str::FromStr,
};

use tracing::level_filters::LevelFilter;

/// How fault responses (unknown records, malformed input) are reported to clients.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FaultPolicy {
	/// Every fault is reported as `500 Internal Server Error`, whatever its cause.
	#[default]
	Generic,
	/// Faults keep their own status, such as `404 Not Found` for unknown records.
	Semantic,
}

impl FromStr for FaultPolicy {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"generic" => Ok(Self::Generic),
			"semantic" => Ok(Self::Semantic),
			_ => Err(()),
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{name} must be {expected}, got {value:?}")]
	Invalid {
		name: &'static str,
		expected: &'static str,
		value: String,
	},
}

/// Runtime configuration, read from the environment.
#[derive(Clone, Debug)]
pub struct Config {
	pub host: IpAddr,
	pub port: u16,
	pub fault_policy: FaultPolicy,
	pub log_level: LevelFilter,
	/// Whether traces and metrics are exported over OTLP.
	pub otlp: bool,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			host: IpAddr::V4(Ipv4Addr::LOCALHOST),
			port: 3000,
			fault_policy: FaultPolicy::default(),
			log_level: LevelFilter::INFO,
			otlp: false,
		}
	}
}

impl Config {
	/// Reads the configuration from the process environment, loading `.env` first if it exists.
	pub fn from_env() -> Result<Self, Error> {
		dotenvy::dotenv().ok();

		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Reads the configuration from an arbitrary variable lookup.
	/// Missing variables fall back to [`Config::default`].
	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
		let default = Self::default();

		Ok(Self {
			host: parse(&lookup, "HOST", "an IP address", default.host)?,
			port: parse(&lookup, "PORT", "a port number", default.port)?,
			fault_policy: parse(
				&lookup,
				"FAULT_STATUS",
				"`generic` or `semantic`",
				default.fault_policy,
			)?,
			log_level: parse(&lookup, "LOG_LEVEL", "a log level", default.log_level)?,
			otlp: parse(&lookup, "OTLP", "`true` or `false`", default.otlp)?,
		})
	}
}

fn parse<T: FromStr>(
	lookup: &impl Fn(&str) -> Option<String>,
	name: &'static str,
	expected: &'static str,
	default: T,
) -> Result<T, Error> {
	let Some(value) = lookup(name) else {
		return Ok(default);
	};

	value.trim().parse().map_err(|_| Error::Invalid {
		name,
		expected,
		value,
	})
}
