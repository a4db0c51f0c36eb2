//! Tests for the line sources


/// A two-page bbox document: one table page and one empty page, with the
/// second data row's words emitted out of reading order
pub fn sample_bbox_document() -> String {
    let mut doc = String::from(
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">
<html xmlns="http://www.w3.org/1999/xhtml">
<head>
<title>All Current Final NPL Sites</title>
<meta name="Producer" content="Report Engine"/>
</head>
<body>
<doc>
  <page width="792.000000" height="612.000000">
"#,
    );

    let row = |y: f64, cells: &[(&str, f64, f64)]| -> String {
        cells
            .iter()
            .map(|(text, x0, x1)| {
                format!(
                    "    <word xMin=\"{:.6}\" yMin=\"{:.6}\" xMax=\"{:.6}\" yMax=\"{:.6}\">{}</word>\n",
                    x0,
                    y,
                    x1,
                    y + 8.0,
                    text
                )
            })
            .collect()
    };

    doc.push_str(&row(
        40.0,
        &[("Region", 20.0, 45.0), ("State", 60.0, 80.0), ("Site", 95.0, 110.0), ("Name", 112.0, 130.0)],
    ));

    // First data row
    doc.push_str(&row(
        60.02,
        &[
            ("01", 20.0, 28.0),
            ("MA", 60.0, 70.0),
            ("New", 95.0, 108.0),
            ("Bedford", 110.0, 135.0),
            ("Site", 137.0, 150.0),
            ("0101", 170.0, 185.0),
            ("MAD980731335", 200.0, 250.0),
            ("Acushnet", 265.0, 295.0),
            ("River", 297.0, 315.0),
            ("New", 330.0, 343.0),
            ("Bedford", 345.0, 370.0),
            ("02740", 385.0, 405.0),
        ],
    ));

    // Second data row, words out of order, ampersand escaped
    doc.push_str(&row(
        72.04,
        &[
            ("02740", 385.0, 405.0),
            ("01", 20.0, 28.0),
            ("Smith", 95.0, 115.0),
            ("&amp;", 117.0, 122.0),
            ("Sons", 124.0, 140.0),
            ("MA", 60.0, 70.0),
            ("0102", 170.0, 185.0),
            ("MAD000000002", 200.0, 250.0),
            ("2", 265.0, 270.0),
            ("Mill", 272.0, 285.0),
            ("Rd", 287.0, 295.0),
            ("Fairhaven", 330.0, 365.0),
        ],
    ));

    doc.push_str(
        r#"  </page>
  <page width="792.000000" height="612.000000">
  </page>
</doc>
</body>
</html>
"#,
    );

    doc
}
