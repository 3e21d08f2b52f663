//! Monitor-type parsing for the attach/detach-by-name-and-type surface
//! of §6: `"trace"`, `"mean"`, `"pD"`, `"popt"`, `"deviance"`,
//! `"logdensity"`.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonitorKind {
    Trace,
    Mean,
    PD,
    Popt,
    Deviance,
    LogDensity,
}

impl MonitorKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "trace" => Some(MonitorKind::Trace),
            "mean" => Some(MonitorKind::Mean),
            "pD" => Some(MonitorKind::PD),
            "popt" => Some(MonitorKind::Popt),
            "deviance" => Some(MonitorKind::Deviance),
            "logdensity" => Some(MonitorKind::LogDensity),
            _ => None,
        }
    }

    /// True for monitor kinds that observe exactly one node (the
    /// node's own value), as opposed to the density-based kinds which
    /// may pool several observed nodes together.
    pub fn is_single_node(self) -> bool {
        matches!(self, MonitorKind::Trace | MonitorKind::Mean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_documented_monitor_type() {
        for s in ["trace", "mean", "pD", "popt", "deviance", "logdensity"] {
            assert!(MonitorKind::parse(s).is_some(), "{s} should parse");
        }
        assert!(MonitorKind::parse("bogus").is_none());
    }
}
