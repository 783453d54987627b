use crate::canvas::PageCanvas;
use crate::encoding::to_win_ansi;
use crate::error::RenderError;
use folio_style::StandardFont;
use image::RgbImage;
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};

/// Name under which an image XObject is registered in the shared resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHandle {
    name: String,
    width: u32,
    height: u32,
}

impl ImageHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Values written into the document information dictionary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentInfo {
    pub title: String,
    pub author: String,
    pub subject: String,
    /// A PDF date string such as `D:20240131120000`.
    pub creation_date: Option<String>,
}

/// Builds a PDF in memory from page canvases.
///
/// All pages share one page size and one resource dictionary holding the three
/// Helvetica faces and every registered image.
#[derive(Debug)]
pub struct PdfWriter {
    doc: Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    images: Dictionary,
    page_ids: Vec<ObjectId>,
    width: f32,
    height: f32,
    info: DocumentInfo,
}

impl PdfWriter {
    pub fn new(width: f32, height: f32) -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let resources_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            resources_id,
            images: Dictionary::new(),
            page_ids: Vec::new(),
            width,
            height,
            info: DocumentInfo::default(),
        }
    }

    pub fn with_info(mut self, info: DocumentInfo) -> Self {
        self.info = info;
        self
    }

    pub fn page_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// A fresh canvas sized for this document's pages.
    pub fn canvas(&self) -> PageCanvas {
        PageCanvas::new(self.height)
    }

    /// Registers an RGB raster as an image XObject.
    pub fn add_image(&mut self, image: &RgbImage) -> Result<ImageHandle, RenderError> {
        let name = format!("Im{}", self.images.len() + 1);
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(RenderError::Image {
                name,
                message: format!("empty raster {}x{}", width, height),
            });
        }
        let dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        };
        let image_id = self
            .doc
            .add_object(Object::Stream(Stream::new(dict, image.as_raw().clone())));
        self.images.set(name.as_bytes(), Object::Reference(image_id));
        log::debug!("Registered image {} ({}x{})", name, width, height);
        Ok(ImageHandle { name, width, height })
    }

    /// Appends a page drawn on `canvas` and returns its zero-based index.
    pub fn add_page(&mut self, canvas: PageCanvas) -> Result<usize, RenderError> {
        let content_id = self
            .doc
            .add_object(Stream::new(dictionary! {}, canvas.encode()?));
        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), self.width.into(), self.height.into()],
            "Contents" => Object::Array(vec![Object::Reference(content_id)]),
            "Resources" => self.resources_id,
        });
        self.page_ids.push(page_id);
        Ok(self.page_ids.len() - 1)
    }

    /// Draws `canvas` on top of an already added page.
    pub fn overlay(&mut self, page_index: usize, canvas: PageCanvas) -> Result<(), RenderError> {
        let page_id = *self
            .page_ids
            .get(page_index)
            .ok_or(RenderError::MissingPage(page_index))?;
        let content_id = self
            .doc
            .add_object(Stream::new(dictionary! {}, canvas.encode()?));

        let page = self.doc.get_object_mut(page_id)?.as_dict_mut()?;
        let mut contents = match page.get(b"Contents") {
            Ok(Object::Array(existing)) => existing.clone(),
            Ok(single) => vec![single.clone()],
            Err(_) => Vec::new(),
        };
        contents.push(Object::Reference(content_id));
        page.set("Contents", Object::Array(contents));
        Ok(())
    }

    fn font_dictionary() -> Dictionary {
        let mut fonts = Dictionary::new();
        for font in StandardFont::all() {
            fonts.set(
                font.resource_name(),
                dictionary! {
                    "Type" => "Font",
                    "Subtype" => "Type1",
                    "BaseFont" => font.postscript_name(),
                    "Encoding" => "WinAnsiEncoding",
                },
            );
        }
        fonts
    }

    fn info_dictionary(info: &DocumentInfo) -> Dictionary {
        let text = |s: &str| Object::String(to_win_ansi(s), StringFormat::Literal);
        let mut dict = dictionary! {
            "Producer" => text("folio"),
            "Creator" => text("folio"),
        };
        if !info.title.is_empty() {
            dict.set("Title", text(&info.title));
        }
        if !info.author.is_empty() {
            dict.set("Author", text(&info.author));
        }
        if !info.subject.is_empty() {
            dict.set("Subject", text(&info.subject));
        }
        if let Some(date) = &info.creation_date {
            dict.set("CreationDate", text(date));
        }
        dict
    }

    /// Writes the page tree, catalog and info dictionary and serializes the document.
    pub fn finish(mut self) -> Result<Vec<u8>, RenderError> {
        if self.page_ids.is_empty() {
            return Err(RenderError::Other("document has no pages".into()));
        }

        let resources = dictionary! {
            "Font" => Self::font_dictionary(),
            "XObject" => self.images,
            "ProcSet" => vec!["PDF".into(), "Text".into(), "ImageC".into()],
        };
        self.doc.objects.insert(self.resources_id, resources.into());

        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => self.page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<Object>>(),
            "Count" => self.page_ids.len() as i64,
        };
        self.doc.objects.insert(self.pages_id, pages.into());

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        let info_id = self.doc.add_object(Self::info_dictionary(&self.info));
        self.doc.trailer.set("Root", catalog_id);
        self.doc.trailer.set("Info", info_id);

        self.doc.compress();
        let mut bytes = Vec::new();
        self.doc.save_to(&mut bytes)?;
        log::debug!("Serialized {} pages into {} bytes", self.page_ids.len(), bytes.len());
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{TextAnchor, TextStyle};
    use folio_types::{Color, Rect};

    fn text_page(writer: &PdfWriter, text: &str) -> PageCanvas {
        let mut canvas = writer.canvas();
        canvas.text(text, 72.0, 72.0, TextStyle::regular(12.0, Color::BLACK), TextAnchor::Left);
        canvas
    }

    #[test]
    fn writes_pages_and_overlays() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut writer = PdfWriter::new(595.0, 842.0);
        for body in ["First body", "Second body"] {
            let page = text_page(&writer, body);
            writer.add_page(page).unwrap();
        }
        for index in 0..writer.page_count() {
            let footer = text_page(&writer, &format!("Page {} of 2", index + 1));
            writer.overlay(index, footer).unwrap();
        }

        let bytes = writer.finish().unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
        let second = doc.extract_text(&[2]).unwrap();
        assert!(second.contains("Second body"));
        assert!(second.contains("Page 2 of 2"));
    }

    #[test]
    fn overlay_on_missing_page_fails() {
        let mut writer = PdfWriter::new(595.0, 842.0);
        let canvas = writer.canvas();
        assert!(matches!(
            writer.overlay(3, canvas),
            Err(RenderError::MissingPage(3))
        ));
    }

    #[test]
    fn images_become_shared_xobjects() {
        let mut writer = PdfWriter::new(300.0, 300.0);
        let raster = RgbImage::from_pixel(4, 2, image::Rgb([10, 20, 30]));
        let handle = writer.add_image(&raster).unwrap();
        assert_eq!(handle.name(), "Im1");

        let mut canvas = writer.canvas();
        canvas.image(&handle, Rect::new(10.0, 10.0, 40.0, 20.0));
        writer.add_page(canvas).unwrap();
        let doc = Document::load_mem(&writer.finish().unwrap()).unwrap();

        let image = doc
            .objects
            .values()
            .filter_map(|obj| obj.as_stream().ok())
            .find(|stream| {
                stream
                    .dict
                    .get(b"Subtype")
                    .and_then(|s| s.as_name())
                    .map(|n| n == b"Image")
                    .unwrap_or(false)
            })
            .expect("image stream");
        assert_eq!(image.dict.get(b"Width").unwrap().as_i64().unwrap(), 4);
        assert_eq!(image.dict.get(b"Height").unwrap().as_i64().unwrap(), 2);
    }

    #[test]
    fn empty_rasters_are_rejected() {
        let mut writer = PdfWriter::new(300.0, 300.0);
        let err = writer.add_image(&RgbImage::new(0, 0)).unwrap_err();
        assert!(matches!(err, RenderError::Image { .. }));
    }

    #[test]
    fn document_without_pages_is_an_error() {
        assert!(PdfWriter::new(300.0, 300.0).finish().is_err());
    }
}
