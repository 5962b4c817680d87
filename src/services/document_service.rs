// src/services/document_service.rs

use genpdf::{elements, style, Element};
use image::Luma;
use qrcode::QrCode;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{auth::User, catalog::CatalogDetail},
    services::catalog_service::CatalogService,
};

/// Endereço público do catálogo na vitrine (o QR code do PDF aponta para cá).
pub fn storefront_url(public_base_url: &str, catalog_id: Uuid) -> String {
    format!("{}/vitrine/{}", public_base_url.trim_end_matches('/'), catalog_id)
}

fn pdf_error(e: impl std::fmt::Display) -> AppError {
    AppError::InternalServerError(anyhow::Error::msg(e.to_string()))
}

#[derive(Clone)]
pub struct DocumentService {
    catalog_service: CatalogService,
    fonts_dir: String,
    public_base_url: String,
}

impl DocumentService {
    pub fn new(catalog_service: CatalogService, fonts_dir: String, public_base_url: String) -> Self {
        Self { catalog_service, fonts_dir, public_base_url }
    }

    pub async fn generate_catalog_pdf(
        &self,
        user: Option<&User>,
        catalog_id: Uuid,
    ) -> Result<Vec<u8>, AppError> {
        // 1. Busca os dados (respeita a visibilidade do catálogo)
        let detail = self.catalog_service.get_detail(user, catalog_id).await?;

        let fonts_dir = self.fonts_dir.clone();
        let url = storefront_url(&self.public_base_url, detail.catalog.id);

        // 2. Renderização é CPU pura: fora do runtime
        tokio::task::spawn_blocking(move || render_catalog_pdf(&detail, &fonts_dir, &url))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de geração do PDF: {}", e))?
    }
}

fn render_catalog_pdf(detail: &CatalogDetail, fonts_dir: &str, url: &str) -> Result<Vec<u8>, AppError> {
    let catalog = &detail.catalog;

    // Carrega a fonte da pasta configurada
    let font_family = genpdf::fonts::from_files(fonts_dir, "Roboto", None)
        .map_err(|_| AppError::FontNotFound(format!("Fonte não encontrada na pasta {}", fonts_dir)))?;

    let mut doc = genpdf::Document::new(font_family);
    doc.set_title(catalog.name.clone());
    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(10);
    doc.set_page_decorator(decorator);

    // --- CABEÇALHO ---
    doc.push(
        elements::Paragraph::new(catalog.name.clone())
            .styled(style::Style::new().bold().with_font_size(18)),
    );
    if let Some(description) = &catalog.description {
        doc.push(
            elements::Paragraph::new(description.clone())
                .styled(style::Style::new().with_font_size(10)),
        );
    }
    if let Some(published_at) = catalog.published_at {
        doc.push(elements::Paragraph::new(format!(
            "Publicado em: {}",
            published_at.format("%d/%m/%Y")
        )));
    }
    doc.push(elements::Paragraph::new(format!("Avaliação: {}/5", catalog.rating)));

    doc.push(elements::Break::new(2));

    // --- TABELA DE PRODUTOS ---
    // Pesos das colunas: Produto (5), Destaque (1), Preço (2)
    let mut table = elements::TableLayout::new(vec![5, 1, 2]);
    table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

    let style_bold = style::Style::new().bold();
    table
        .row()
        .element(elements::Paragraph::new("Produto").styled(style_bold))
        .element(elements::Paragraph::new("Destaque").styled(style_bold))
        .element(elements::Paragraph::new("Preço").styled(style_bold))
        .push()
        .map_err(pdf_error)?;

    for product in &detail.products {
        table
            .row()
            .element(elements::Paragraph::new(product.name.clone()))
            .element(elements::Paragraph::new(if product.featured { "Sim" } else { "" }))
            .element(elements::Paragraph::new(format!("R$ {:.2}", product.price)))
            .push()
            .map_err(pdf_error)?;
    }

    if detail.products.is_empty() {
        doc.push(elements::Paragraph::new("Nenhum produto neste catálogo."));
    } else {
        doc.push(table);
    }

    doc.push(elements::Break::new(2));

    // --- QR CODE PARA A VITRINE ---
    doc.push(
        elements::Paragraph::new("VEJA NA VITRINE")
            .styled(style::Style::new().bold().with_font_size(12)),
    );
    doc.push(elements::Paragraph::new(url.to_string()).styled(style::Style::new().with_font_size(8)));
    doc.push(elements::Break::new(1));

    let code = QrCode::new(url.as_bytes()).map_err(pdf_error)?;
    let image_buffer = code.render::<Luma<u8>>().build();
    let dynamic_image = image::DynamicImage::ImageLuma8(image_buffer);

    let pdf_image = elements::Image::from_dynamic_image(dynamic_image)
        .map_err(pdf_error)?
        .with_scale(genpdf::Scale::new(0.5, 0.5));
    doc.push(pdf_image);

    // 3. Renderiza para buffer em memória
    let mut buffer = Vec::new();
    doc.render(&mut buffer).map_err(pdf_error)?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storefront_url_ignores_trailing_slash() {
        let id = Uuid::new_v4();
        assert_eq!(
            storefront_url("https://vitrine.exemplo.com/", id),
            format!("https://vitrine.exemplo.com/vitrine/{}", id)
        );
        assert_eq!(
            storefront_url("http://localhost:3000", id),
            format!("http://localhost:3000/vitrine/{}", id)
        );
    }

    #[test]
    fn missing_fonts_are_reported() {
        let detail = CatalogDetail {
            catalog: crate::services::access::fixtures::catalog(
                Uuid::new_v4(),
                crate::models::catalog::CatalogStatus::Published,
            ),
            products: vec![],
        };
        let result = render_catalog_pdf(&detail, "/caminho/que/nao/existe", "http://x/vitrine/1");
        assert!(matches!(result, Err(AppError::FontNotFound(_))));
    }
}
