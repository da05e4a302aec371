use std::fmt;

use crate::domain::{LegKind, Path, Place, format_duration};
use crate::transit::StopNameResolver;

/// One-line rendering of a path for logs and debug output.
///
/// ```text
/// 09:50 Walk 5m ~ Central ~ T1 10:00-10:20 ~ Harbour ~ Walk 3m 10:23 [$2700]
/// ```
pub struct PathDisplay<'a> {
    path: &'a Path,
    names: &'a dyn StopNameResolver,
}

impl<'a> PathDisplay<'a> {
    pub fn new(path: &'a Path, names: &'a dyn StopNameResolver) -> Self {
        Self { path, names }
    }
}

impl fmt::Display for PathDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.start_time())?;
        for leg in self.path.legs() {
            match leg.kind() {
                LegKind::Transit(details) => write!(
                    f,
                    " {} {}-{}",
                    details.trip_id,
                    leg.start_time(),
                    leg.end_time()
                )?,
                LegKind::Access | LegKind::Transfer | LegKind::Egress => {
                    write!(f, " Walk {}", format_duration(leg.duration()))?
                }
            }
            if let Place::Stop(stop) = leg.to() {
                write!(f, " ~ {} ~", self.names.stop_name(stop))?;
            }
        }
        write!(f, " {}", self.path.end_time())?;
        if let Some(cost) = self.path.cost() {
            write!(f, " [{cost}]")?;
        }
        Ok(())
    }
}
