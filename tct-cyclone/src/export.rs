//! CSV export of a filtered cyclone set.

use crate::track::Cyclone;
use csv::WriterBuilder;

/// Fixed export column order; consumers key on these headers.
pub const EXPORT_HEADERS: [&str; 11] = [
    "ID",
    "Name",
    "Year",
    "Genesis Month",
    "Max Category",
    "Max Wind (km/h)",
    "Min Pressure (hPa)",
    "Duration (days)",
    "Genesis Lat",
    "Genesis Lon",
    "Landfall",
];

/// Write the cyclone set as CSV, one row per cyclone in input order.
pub fn export_cyclones_csv(cyclones: &[Cyclone]) -> anyhow::Result<String> {
    let mut wtr = WriterBuilder::new().from_writer(Vec::new());
    wtr.write_record(EXPORT_HEADERS)?;
    for cyclone in cyclones {
        wtr.write_record(&[
            cyclone.id.clone(),
            cyclone.name.clone(),
            cyclone.year.to_string(),
            cyclone
                .genesis_month()
                .map(|m| m.to_string())
                .unwrap_or_default(),
            cyclone.max_category.to_string(),
            format!("{:.1}", cyclone.max_wind),
            format!("{:.1}", cyclone.min_pressure),
            format!("{:.1}", cyclone.duration_days),
            cyclone
                .genesis_lat
                .map(|v| format!("{:.2}", v))
                .unwrap_or_default(),
            cyclone
                .genesis_lon
                .map(|v| format!("{:.2}", v))
                .unwrap_or_default(),
            if cyclone.landfall { "Yes" } else { "No" }.to_string(),
        ])?;
    }
    let bytes = wtr.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::CyclonePoint;

    fn cyclone(id: &str, year: i32) -> Cyclone {
        let mut c = Cyclone {
            id: id.to_string(),
            name: format!("TC-{}", id),
            year,
            track: vec![CyclonePoint {
                lat: 12.5,
                lon: 144.25,
                date: format!("{}-09-10", year),
                category: 2,
                wind_speed: 120.0,
                pressure: 975.0,
            }],
            max_category: 0,
            max_wind: 0.0,
            min_pressure: 0.0,
            genesis_lat: None,
            genesis_lon: None,
            landfall: true,
            duration_days: 0.0,
        };
        c.recompute_aggregates();
        c
    }

    #[test]
    fn test_row_count_matches_input() {
        let cyclones: Vec<Cyclone> = (0..5).map(|i| cyclone(&format!("c{}", i), 1980)).collect();
        let csv = export_cyclones_csv(&cyclones).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 6); // header + one row per cyclone
        assert_eq!(
            lines[0],
            "ID,Name,Year,Genesis Month,Max Category,Max Wind (km/h),\
             Min Pressure (hPa),Duration (days),Genesis Lat,Genesis Lon,Landfall"
        );
    }

    #[test]
    fn test_row_values() {
        let csv = export_cyclones_csv(&[cyclone("c9", 1984)]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, "c9,TC-c9,1984,9,2,120.0,975.0,0.0,12.50,144.25,Yes");
    }

    #[test]
    fn test_empty_set_is_header_only() {
        let csv = export_cyclones_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn test_unset_year_range_exports_everything() {
        use crate::track::filter_by_years;
        use crate::year_range::YearRange;

        let cyclones: Vec<Cyclone> = (0..12)
            .map(|i| cyclone(&format!("c{}", i), 1955 + i))
            .collect();
        let filtered = filter_by_years(&cyclones, &YearRange::Unset);
        let csv = export_cyclones_csv(&filtered).unwrap();
        assert_eq!(csv.lines().count(), cyclones.len() + 1);
    }
}
