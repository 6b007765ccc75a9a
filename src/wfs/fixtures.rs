//! Canned WFS responses for tests.

/// A `fmi::...::simple` style feature collection with one element per row.
pub(crate) fn simple_response(rows: &[(&str, &str)]) -> String {
    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<wfs:FeatureCollection timeStamp="2022-09-26T10:00:00Z" numberMatched="{n}" numberReturned="{n}"
    xmlns:wfs="http://www.opengis.net/wfs/2.0"
    xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
    xmlns:gml="http://www.opengis.net/gml/3.2"
    xmlns:BsWfs="http://xml.fmi.fi/schema/wfs/2.0">
"#,
        n = rows.len()
    );
    for (i, (time, value)) in rows.iter().enumerate() {
        xml.push_str(&format!(
            r#"  <wfs:member>
    <BsWfs:BsWfsElement gml:id="BsWfsElement.1.{i}.1">
      <BsWfs:Location>
        <gml:Point gml:id="BsWfsElementP.1.{i}.1" srsDimension="2" srsName="http://www.opengis.net/def/crs/EPSG/0/4258">
          <gml:pos>60.17523 24.94459 </gml:pos>
        </gml:Point>
      </BsWfs:Location>
      <BsWfs:Time>{time}</BsWfs:Time>
      <BsWfs:ParameterName>TA_PT1H_AVG</BsWfs:ParameterName>
      <BsWfs:ParameterValue>{value}</BsWfs:ParameterValue>
    </BsWfs:BsWfsElement>
  </wfs:member>
"#
        ));
    }
    xml.push_str("</wfs:FeatureCollection>\n");
    xml
}

pub(crate) fn exception_report(message: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ExceptionReport xmlns="http://www.opengis.net/ows/1.1" version="2.0.0" xml:lang="eng">
  <Exception exceptionCode="OperationParsingFailed">
    <ExceptionText>{message}</ExceptionText>
  </Exception>
</ExceptionReport>
"#
    )
}
