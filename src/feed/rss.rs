//! RSS 2.0 serialization
//!
//! Items are written in the order given. Article bodies go into
//! `content:encoded` as CDATA so the raw HTML survives untouched.

use crate::feed::types::{Channel, FeedItem};
use crate::FeedResult;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

const CONTENT_NAMESPACE: &str = "http://purl.org/rss/1.0/modules/content/";

/// Serializes a channel and its items as an RSS 2.0 document
///
/// # Arguments
///
/// * `channel` - Channel metadata
/// * `items` - Items in the order they should appear
///
/// # Returns
///
/// * `Ok(String)` - The complete XML document
/// * `Err(FeedError)` - The writer failed
///
/// # Example
///
/// ```
/// use page_harvest::feed::{write_rss, Channel, FeedItem};
///
/// let channel = Channel {
///     title: "News".to_string(),
///     link: "https://example.com/list".to_string(),
///     description: "Latest".to_string(),
/// };
/// let xml = write_rss(&channel, &[FeedItem::new("https://example.com/a")]).unwrap();
/// assert!(xml.contains("<guid>https://example.com/a</guid>"));
/// ```
pub fn write_rss(channel: &Channel, items: &[FeedItem]) -> FeedResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    rss.push_attribute(("xmlns:content", CONTENT_NAMESPACE));
    writer.write_event(Event::Start(rss))?;
    writer.write_event(Event::Start(BytesStart::new("channel")))?;

    write_text_element(&mut writer, "title", &channel.title)?;
    write_text_element(&mut writer, "link", &channel.link)?;
    write_text_element(&mut writer, "description", &channel.description)?;

    for item in items {
        write_item(&mut writer, item)?;
    }

    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    writer.write_event(Event::End(BytesEnd::new("rss")))?;

    let xml = String::from_utf8(writer.into_inner())?;
    Ok(xml)
}

fn write_item(writer: &mut Writer<Vec<u8>>, item: &FeedItem) -> FeedResult<()> {
    writer.write_event(Event::Start(BytesStart::new("item")))?;

    if let Some(title) = &item.title {
        write_text_element(writer, "title", title)?;
    }
    write_text_element(writer, "link", &item.link)?;

    let mut guid = BytesStart::new("guid");
    guid.push_attribute(("isPermaLink", "true"));
    writer.write_event(Event::Start(guid))?;
    writer.write_event(Event::Text(BytesText::new(&item.id)))?;
    writer.write_event(Event::End(BytesEnd::new("guid")))?;

    if let Some(author) = &item.author {
        write_text_element(writer, "author", author)?;
    }
    if let Some(created) = &item.created {
        write_text_element(writer, "pubDate", &created.to_rfc2822())?;
    }

    if let Some(enclosure) = item.enclosure.as_ref().filter(|e| e.is_renderable()) {
        let mut element = BytesStart::new("enclosure");
        element.push_attribute(("url", enclosure.url.as_str()));
        element.push_attribute(("length", enclosure.length.as_str()));
        element.push_attribute(("type", enclosure.mime_type.as_str()));
        writer.write_event(Event::Empty(element))?;
    }

    if let Some(content) = &item.content {
        writer.write_event(Event::Start(BytesStart::new("content:encoded")))?;
        for section in cdata_sections(content) {
            writer.write_event(Event::CData(BytesCData::new(section)))?;
        }
        writer.write_event(Event::End(BytesEnd::new("content:encoded")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("item")))?;
    Ok(())
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> FeedResult<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Splits `content` so that no section contains the CDATA terminator `]]>`
fn cdata_sections(content: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut start = 0;
    while let Some(offset) = content[start..].find("]]>") {
        let split = start + offset + 2;
        sections.push(&content[start..split]);
        start = split;
    }
    sections.push(&content[start..]);
    sections
}
