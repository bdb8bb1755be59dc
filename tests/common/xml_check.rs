//! Minimal structural XML reader for checking rendered reports.
//!
//! Understands the subset the renderer emits: a declaration, elements with
//! double-quoted attributes, CDATA sections and whitespace.

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Element>,
    pub text: String,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn attr_names(&self) -> Vec<&str> {
        self.attrs.iter().map(|(k, _)| k.as_str()).collect()
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }
}

/// Parse `xml` into its root element, or describe why it is malformed.
pub fn parse(xml: &str) -> Result<Element, String> {
    let mut s = xml.trim_start();
    if s.starts_with("<?") {
        let end = s.find("?>").ok_or("unterminated declaration")?;
        s = &s[end + 2..];
    }

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    let mut i = 0;

    while i < s.len() {
        let rest = &s[i..];
        if rest.starts_with("<![CDATA[") {
            let end = rest.find("]]>").ok_or("unterminated CDATA")?;
            let parent = stack.last_mut().ok_or("CDATA outside of an element")?;
            parent.text.push_str(&rest[9..end]);
            i += end + 3;
        } else if rest.starts_with("</") {
            let end = rest.find('>').ok_or("unterminated end tag")?;
            let name = rest[2..end].trim();
            let element = stack.pop().ok_or("end tag without start tag")?;
            if element.name != name {
                return Err(format!("expected </{}>, found </{}>", element.name, name));
            }
            attach(&mut stack, &mut root, element)?;
            i += end + 1;
        } else if rest.starts_with('<') {
            let end = rest.find('>').ok_or("unterminated start tag")?;
            let mut tag = &rest[1..end];
            let self_closing = tag.ends_with('/');
            if self_closing {
                tag = &tag[..tag.len() - 1];
            }
            let element = start_tag(tag)?;
            if self_closing {
                attach(&mut stack, &mut root, element)?;
            } else {
                stack.push(element);
            }
            i += end + 1;
        } else {
            let end = rest.find('<').unwrap_or(rest.len());
            let text = &rest[..end];
            if !text.trim().is_empty() {
                let parent = stack.last_mut().ok_or("text outside of root")?;
                parent.text.push_str(&unescape(text));
            }
            i += end;
        }
    }

    if let Some(open) = stack.last() {
        return Err(format!("unclosed element <{}>", open.name));
    }
    root.ok_or_else(|| "no root element".to_string())
}

fn attach(
    stack: &mut Vec<Element>,
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), String> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err("more than one root element".to_string()),
    }
    Ok(())
}

fn start_tag(tag: &str) -> Result<Element, String> {
    let tag = tag.trim();
    let name_end = tag.find(char::is_whitespace).unwrap_or(tag.len());
    let name = &tag[..name_end];
    if name.is_empty() {
        return Err("empty tag name".to_string());
    }

    let mut attrs: Vec<(String, String)> = Vec::new();
    let mut rest = tag[name_end..].trim_start();
    while !rest.is_empty() {
        let eq = rest.find('=').ok_or(format!("attribute without value in <{}>", name))?;
        let key = rest[..eq].trim().to_string();
        let after = &rest[eq + 1..];
        if !after.starts_with('"') {
            return Err(format!("unquoted attribute {} in <{}>", key, name));
        }
        let close = after[1..]
            .find('"')
            .ok_or(format!("unterminated attribute {} in <{}>", key, name))?;
        let value = unescape(&after[1..1 + close]);
        if attrs.iter().any(|(k, _)| *k == key) {
            return Err(format!("duplicate attribute {} in <{}>", key, name));
        }
        attrs.push((key, value));
        rest = after[close + 2..].trim_start();
    }

    Ok(Element {
        name: name.to_string(),
        attrs,
        children: Vec::new(),
        text: String::new(),
    })
}

fn unescape(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#10;", "\n")
        .replace("&#13;", "\r")
        .replace("&#9;", "\t")
        .replace("&amp;", "&")
}
