use std::fmt;

#[macro_export]
macro_rules! xml_format_args {
    // ends a tag
    (@inner(> $($attrs:tt)*) -> ($($pattern:expr),*), ($($args:expr),*)) => {
        $crate::xml_format_args!(@outer($($attrs)*) -> ($($pattern),*, ">"), ($($args),*))
    };
    // ends a self-closing element
    (@inner(/> $($attrs:tt)*) -> ($($pattern:expr),*), ($($args:expr),*)) => {
        $crate::xml_format_args!(@outer($($attrs)*) -> ($($pattern),*, " />"), ($($args),*))
    };
    // matches an attribute with a doubly-hyphenated name, eg. data-trip-id
    (@inner($aname1:ident-$aname2:ident-$aname3:ident $($attrs:tt)*) -> ($($pattern:expr),*), ($($args:expr),*)) => {
        $crate::xml_format_args!(@attr($($attrs)*) -> ($($pattern),*, " ", stringify!($aname1), "-", stringify!($aname2), "-", stringify!($aname3)), ($($args),*))
    };
    // matches an attribute with a singly-hyphenated name
    (@inner($aname1:ident-$aname2:ident $($attrs:tt)*) -> ($($pattern:expr),*), ($($args:expr),*)) => {
        $crate::xml_format_args!(@attr($($attrs)*) -> ($($pattern),*, " ", stringify!($aname1), "-", stringify!($aname2)), ($($args),*))
    };
    // matches an attribute which fits in a rust identifier
    (@inner($aname:ident $($attrs:tt)*) -> ($($pattern:expr),*), ($($args:expr),*)) => {
        $crate::xml_format_args!(@attr($($attrs)*) -> ($($pattern),*, " ", stringify!($aname)), ($($args),*))
    };

    // an expression, evaluating to an iterable as a comma-separated attribute value
    (@attr(=[$avalue:expr,] $($attrs:tt)*) -> ($($pattern:expr),*), ($($args:expr),*)) => {
        $crate::xml_format_args!(@inner($($attrs)*) -> ($($pattern),*, "=\"{}\""), ($($args,)* $crate::draw::xml::JoinList { list: $avalue, join: "," }))
    };
    // an expression as an attribute value
    (@attr(={$avalue:expr} $($attrs:tt)*) -> ($($pattern:expr),*), ($($args:expr),*)) => {
        $crate::xml_format_args!(@inner($($attrs)*) -> ($($pattern),*, "=\"{}\""), ($($args,)* $crate::draw::xml::Escaped($avalue)))
    };
    // a literal as an attribute value
    (@attr(=$avalue:literal $($attrs:tt)*) -> ($($pattern:expr),*), ($($args:expr),*)) => {
        $crate::xml_format_args!(@inner($($attrs)*) -> ($($pattern),*, "=\"", $avalue, "\""), ($($args),*))
    };

    // starts a tag
    (@outer(<$name:ident $($attrs:tt)*) -> ($($pattern:expr),*), ($($args:expr),*)) => {
        $crate::xml_format_args!(@inner($($attrs)*) -> ($($pattern),*, "<", stringify!($name)), ($($args),*))
    };
    // matches an end tag
    (@outer(</$name:ident> $($attrs:tt)*) -> ($($pattern:expr),*), ($($args:expr),*)) => {
        $crate::xml_format_args!(@outer($($attrs)*) -> ($($pattern),*, "</", stringify!($name), ">"), ($($args),*))
    };
    // matches a text expression
    (@outer({$text:expr} $($attrs:tt)*) -> ($($pattern:expr),*), ($($args:expr),*)) => {
        $crate::xml_format_args!(@outer($($attrs)*) -> ($($pattern),*, "{}"), ($($args,)* $crate::draw::xml::Escaped($text)))
    };
    // matches a text literal
    (@outer($text:literal $($attrs:tt)*) -> ($($pattern:expr),*), ($($args:expr),*)) => {
        $crate::xml_format_args!(@outer($($attrs)*) -> ($($pattern),*, $text), ($($args),*))
    };
    // matches the end of the xml
    (@outer() -> ($($pattern:expr),*), ($($args:expr),*)) => {
        format_args!(concat!($($pattern),*, "\n"), $($args),*)
    };

    // matches the start of a tag, for opening the xml
    (<$($attrs:tt)*) => {
        $crate::xml_format_args!(@outer(<$($attrs)*) -> (""), ())
    };
}

/// Write XML, expression text and attribute values are escaped
#[macro_export]
macro_rules! write_xml {
    ($dst:expr, $($attrs:tt)*) => {
        $dst.write_fmt($crate::xml_format_args!($($attrs)*))
    }
}

/// Format xml elements and their attributes as a `String`
#[macro_export]
macro_rules! format_xml {
    ($($attrs:tt)*) => {{
        let mut s = String::new();
        std::fmt::Write::write_fmt(&mut s, $crate::xml_format_args!($($attrs)*))
            .expect("a formatting trait implementation returned an error");
        s
    }}
}

pub struct JoinList<D, I>
where
    D: fmt::Display,
    I: IntoIterator<Item = D> + Copy,
{
    pub list: I,
    pub join: &'static str,
}

impl<D, I> fmt::Display for JoinList<D, I>
where
    D: fmt::Display,
    I: IntoIterator<Item = D> + Copy,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.list.into_iter();
        if let Some(i) = iter.next() {
            i.fmt(f)?;
        }
        for i in iter {
            f.write_str(self.join)?;
            i.fmt(f)?;
        }
        Ok(())
    }
}

/// Displays the inner value with `&`, `<` and `"` replaced by entities
pub struct Escaped<D: fmt::Display>(pub D);

impl<D: fmt::Display> fmt::Display for Escaped<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        write!(EscapingWriter(f), "{}", self.0)
    }
}

struct EscapingWriter<'a, 'b>(&'a mut fmt::Formatter<'b>);

impl fmt::Write for EscapingWriter<'_, '_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let mut rest = s;
        while let Some(i) = rest.find(|c: char| c == '&' || c == '<' || c == '"') {
            self.0.write_str(&rest[..i])?;
            self.0.write_str(match rest.as_bytes()[i] {
                b'&' => "&amp;",
                b'<' => "&lt;",
                _ => "&quot;",
            })?;
            rest = &rest[i + 1..];
        }
        self.0.write_str(rest)
    }
}

#[test]
fn self_closing() {
    assert_eq!(format_xml!(<circle />), "<circle />\n");
}

#[test]
fn self_closing_attributes() {
    assert_eq!(
        format_xml!(<circle r={3} class={"ret40"} />),
        "<circle r=\"3\" class=\"ret40\" />\n"
    );
}

#[test]
fn literal_attribute() {
    assert_eq!(format_xml!(<g class="trip train" />), "<g class=\"trip train\" />\n");
}

#[test]
fn hyphenated_attributes() {
    assert_eq!(
        format_xml!(<path stroke-width="1px" data-trip-id={"NS:42"} />),
        "<path stroke-width=\"1px\" data-trip-id=\"NS:42\" />\n"
    );
}

#[test]
fn comma_separated_attribute() {
    let list = &[1, 2, 3];
    assert_eq!(format_xml!(<tag att=[list,] />), "<tag att=\"1,2,3\" />\n");
}

#[test]
fn text_is_escaped() {
    assert_eq!(
        format_xml!(<text>{"Delft - TU S&C"}</text>),
        "<text>Delft - TU S&amp;C</text>\n"
    );
    assert_eq!(
        format_xml!(<g data-trip-id={"a\"<b"} />),
        "<g data-trip-id=\"a&quot;&lt;b\" />\n"
    );
}

#[test]
fn text_literal_containing() {
    assert_eq!(format_xml!(<text>"05:01:00"</text>), "<text>05:01:00</text>\n");
}

#[test]
fn element_containing() {
    assert_eq!(format_xml!(<g><circle /></g>), "<g><circle /></g>\n");
}
