use std::collections::HashMap;

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};
use uuid::Uuid;

use crate::error::Result;
use crate::models::candidate::Candidate;
use crate::models::fit_score::FitScore;

pub struct ExportService;

impl ExportService {
    /// Styled XLSX workbook of candidates with their latest fit score for
    /// one job (or without scores when exporting the whole pool).
    pub fn generate_candidates_xlsx(
        title: &str,
        candidates: &[Candidate],
        scores: &HashMap<Uuid, FitScore>,
    ) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Candidates")?;

        let header_bg = Color::RGB(0x0F172A);
        let header_text = Color::White;
        let alt_row = Color::RGB(0xF8FAFC);
        let border_color = Color::RGB(0xE2E8F0);

        let score_high = Color::RGB(0x10B981);
        let score_mid = Color::RGB(0xF59E0B);
        let score_low = Color::RGB(0xEF4444);

        let columns = [
            ("#", 6.0),
            ("Name", 28.0),
            ("Email", 30.0),
            ("Location", 18.0),
            ("Skills", 40.0),
            ("Status", 14.0),
            ("Overall", 10.0),
            ("Confidence", 12.0),
            ("TMS", 8.0),
            ("SRS", 8.0),
            ("RNS", 8.0),
            ("Registered", 20.0),
        ];

        for (i, (_, width)) in columns.iter().enumerate() {
            worksheet.set_column_width(i as u16, *width)?;
        }

        let title_format = Format::new()
            .set_font_size(14)
            .set_bold()
            .set_font_color(header_text)
            .set_background_color(header_bg)
            .set_align(FormatAlign::CenterAcross)
            .set_align(FormatAlign::VerticalCenter);
        worksheet.set_row_height(0, 32)?;
        worksheet.merge_range(0, 0, 0, (columns.len() - 1) as u16, title, &title_format)?;

        let header_format = Format::new()
            .set_bold()
            .set_font_size(10)
            .set_font_color(header_text)
            .set_background_color(header_bg)
            .set_align(FormatAlign::Center)
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);
        for (i, (name, _)) in columns.iter().enumerate() {
            worksheet.write_with_format(1, i as u16, *name, &header_format)?;
        }

        for (idx, candidate) in candidates.iter().enumerate() {
            let row = (idx + 2) as u32;
            let base = if idx % 2 == 0 {
                Format::new().set_background_color(alt_row)
            } else {
                Format::new()
            };

            worksheet.write_with_format(row, 0, (idx + 1) as u32, &base)?;
            worksheet.write_with_format(row, 1, candidate.name.as_str(), &base)?;
            worksheet.write_with_format(row, 2, candidate.email.as_str(), &base)?;
            worksheet.write_with_format(row, 3, candidate.location.as_deref().unwrap_or("-"), &base)?;
            worksheet.write_with_format(row, 4, candidate.skills.join(", ").as_str(), &base)?;
            worksheet.write_with_format(row, 5, candidate.status.as_str(), &base)?;

            match scores.get(&candidate.id) {
                Some(score) => {
                    let score_color = if score.overall >= 70 {
                        score_high
                    } else if score.overall >= 40 {
                        score_mid
                    } else {
                        score_low
                    };
                    let overall_format = Format::new()
                        .set_bold()
                        .set_font_color(score_color)
                        .set_align(FormatAlign::Center);
                    worksheet.write_with_format(row, 6, score.overall, &overall_format)?;
                    worksheet.write_with_format(row, 7, score.confidence.as_str(), &base)?;
                    worksheet.write_with_format(row, 8, score.tms, &base)?;
                    worksheet.write_with_format(row, 9, score.srs, &base)?;
                    worksheet.write_with_format(row, 10, score.rns, &base)?;
                }
                None => {
                    worksheet.write_with_format(row, 6, "-", &base)?;
                    worksheet.write_with_format(row, 7, "-", &base)?;
                }
            }

            let registered = candidate
                .created_at
                .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
                .unwrap_or_default();
            worksheet.write_with_format(row, 11, registered.as_str(), &base)?;
        }

        let bytes = workbook.save_to_buffer()?;
        Ok(bytes)
    }
}
