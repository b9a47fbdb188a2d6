/*
 * Copyright 2020 UT OVERSEAS INC
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */


use std::net::Ipv4Addr;

use lazy_static::lazy_static;

use crate::buffer::SharedBuffer;
use crate::layout::{Field, FieldLayout, LayoutBuilder};
use crate::open_enum;
use crate::utils::errors::{RangeError, Result};
use crate::utils::types::{Index, IPV4_ADDRESS_LENGTH, U16_SIZE, U8_SIZE};
use crate::view::HeaderView;

/**
 * One link of an OSPF router LSA
 *
 * <pre>
 *  0                   1                   2                   3
 *  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
 * +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
 * |                          Link ID                              |
 * +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
 * |                         Link Data                             |
 * +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
 * |     Type      |     # TOS     |            metric             |
 * +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
 * |      TOS      |        0      |          TOS  metric          |
 * +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
 * |                              ...                              |
 * </pre>
 *
 * "# TOS" counts the 4 byte TOS entries following the fixed 12 bytes.
 */
pub struct RouterLinkFields {
    pub link_id: Field,
    pub link_data: Field,
    pub link_type: Field,
    pub tos_number: Field,
    pub metric: Field,
    pub additional_metrics: Index,
    // First TOS entry, later entries are shifted by TOS_METRIC_LENGTH each
    pub tos: Field,
    pub tos_metric: Field,
    pub layout: FieldLayout,
}

pub const TOS_METRIC_LENGTH: Index = 4;

impl RouterLinkFields {
    fn build() -> Self {
        let mut layout = LayoutBuilder::new("router link");
        let link_id = layout.append("link_id", IPV4_ADDRESS_LENGTH);
        let link_data = layout.append("link_data", IPV4_ADDRESS_LENGTH);
        let link_type = layout.append("type", U8_SIZE);
        let tos_number = layout.append("tos_number", U8_SIZE);
        let metric = layout.append("metric", U16_SIZE);
        let additional_metrics = layout.tail("additional_metrics");

        Self {
            link_id,
            link_data,
            link_type,
            tos_number,
            metric,
            additional_metrics,
            tos: Field::new("tos", additional_metrics, U8_SIZE),
            tos_metric: Field::new("tos_metric", additional_metrics + U16_SIZE, U16_SIZE),
            layout: layout.finish_static(),
        }
    }

    fn tos_entry(&self, index: Index) -> (Field, Field) {
        let distance = index * TOS_METRIC_LENGTH;
        (self.tos.shift(distance), self.tos_metric.shift(distance))
    }
}

lazy_static! {
    pub static ref ROUTER_LINK_FIELDS: RouterLinkFields = RouterLinkFields::build();
    pub static ref ROUTER_LINK_FIXED_LENGTH: Index = ROUTER_LINK_FIELDS.layout.length();
}

open_enum! {
    pub struct RouterLinkType(u8) {
        POINT_TO_POINT = 1,
        TRANSIT = 2,
        STUB = 3,
        VIRTUAL = 4,
    }
}

/// Metric advertised for one type of service
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TosMetric {
    pub tos: u8,
    pub metric: u16,
}

/// Overlay of a single router link. The view covers the fixed part plus the TOS entries, so its
/// length follows the TOS count.
#[derive(Debug)]
pub struct RouterLink {
    header: HeaderView,
}

impl RouterLink {
    pub fn from_view(header: HeaderView) -> Result<Self> {
        header.check(0, *ROUTER_LINK_FIXED_LENGTH)?;
        let link = Self { header };
        let length = link.record_length()?;
        link.header.check(0, length)?;
        Ok(link)
    }

    /// Overlays the link at `offset`, sizing the view from its TOS count.
    pub fn parse(buffer: SharedBuffer, offset: Index) -> Result<Self> {
        let mut header = HeaderView::new(buffer, offset, *ROUTER_LINK_FIXED_LENGTH)?;
        let tos_number: u8 = header.get(&ROUTER_LINK_FIELDS.tos_number)?;
        header.set_length(Self::length_for(tos_number))?;
        Ok(Self { header })
    }

    #[inline]
    pub fn header(&self) -> &HeaderView {
        &self.header
    }

    pub fn link_id(&self) -> Result<Ipv4Addr> {
        self.address(&ROUTER_LINK_FIELDS.link_id)
    }

    pub fn link_data(&self) -> Result<Ipv4Addr> {
        self.address(&ROUTER_LINK_FIELDS.link_data)
    }

    pub fn link_type(&self) -> Result<RouterLinkType> {
        self.header.get::<u8>(&ROUTER_LINK_FIELDS.link_type).map(RouterLinkType::from)
    }

    pub fn tos_number(&self) -> Result<u8> {
        self.header.get(&ROUTER_LINK_FIELDS.tos_number)
    }

    pub fn metric(&self) -> Result<u16> {
        self.header.get(&ROUTER_LINK_FIELDS.metric)
    }

    pub fn additional_metrics(&self) -> Result<Vec<TosMetric>> {
        let count = self.tos_number()?;
        self.header.check(0, Self::length_for(count))?;

        (0..Index::from(count))
            .map(|index| {
                let (tos, metric) = ROUTER_LINK_FIELDS.tos_entry(index);
                Ok(TosMetric {
                    tos: self.header.get(&tos)?,
                    metric: self.header.get(&metric)?,
                })
            })
            .collect()
    }

    pub fn record_length(&self) -> Result<Index> {
        self.tos_number().map(Self::length_for)
    }

    pub fn set_link_id(&mut self, address: Ipv4Addr) -> Result<()> {
        self.header.put_bytes(&ROUTER_LINK_FIELDS.link_id, &address.octets())
    }

    pub fn set_link_data(&mut self, address: Ipv4Addr) -> Result<()> {
        self.header.put_bytes(&ROUTER_LINK_FIELDS.link_data, &address.octets())
    }

    pub fn set_link_type(&mut self, value: RouterLinkType) -> Result<()> {
        self.header.put(&ROUTER_LINK_FIELDS.link_type, value.raw())
    }

    pub fn set_metric(&mut self, value: u16) -> Result<()> {
        self.header.put(&ROUTER_LINK_FIELDS.metric, value)
    }

    /// Rewrites the TOS entries and their count. The buffer must already have room for them;
    /// on a range error nothing is written.
    pub fn set_additional_metrics(&mut self, metrics: &[TosMetric]) -> Result<()> {
        if metrics.len() > usize::from(u8::MAX) {
            return Err(RangeError::ValueOutOfBounds {
                field: ROUTER_LINK_FIELDS.tos_number.name,
                value: metrics.len() as u64,
                max: u64::from(u8::MAX),
            }
            .into());
        }
        let length = Self::length_for(metrics.len() as u8);
        self.header.set_length(length)?;

        self.header.put(&ROUTER_LINK_FIELDS.tos_number, metrics.len() as u8)?;
        for (index, entry) in metrics.iter().enumerate() {
            let (tos, metric) = ROUTER_LINK_FIELDS.tos_entry(index);
            self.header.put(&tos, entry.tos)?;
            self.header.fill(tos.end(), U8_SIZE, 0)?;
            self.header.put(&metric, entry.metric)?;
        }
        Ok(())
    }

    fn length_for(tos_number: u8) -> Index {
        *ROUTER_LINK_FIXED_LENGTH + Index::from(tos_number) * TOS_METRIC_LENGTH
    }

    fn address(&self, field: &Field) -> Result<Ipv4Addr> {
        let bytes = self.header.get_bytes(field)?;
        match bytes.as_slice() {
            [a, b, c, d] => Ok(Ipv4Addr::new(*a, *b, *c, *d)),
            _ => Err(RangeError::OutOfBounds {
                offset: field.offset,
                length: IPV4_ADDRESS_LENGTH,
                bound: field.end(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Stub network 10.1.0.0/255.255.0.0, metric 10, one TOS entry (tos 2, metric 20),
    // followed by the next link of the LSA
    const STUB_LINK: [u8; 20] = [
        0x0a, 0x01, 0x00, 0x00, 0xff, 0xff, 0x00, 0x00, 0x03, 0x01, 0x00, 0x0a, 0x02, 0x00, 0x00,
        0x14, 0xc0, 0xa8, 0x00, 0x01,
    ];

    #[test]
    fn layout_positions() {
        assert_eq!(ROUTER_LINK_FIELDS.layout.offsets(), vec![0, 4, 8, 9, 10]);
        assert_eq!(ROUTER_LINK_FIELDS.additional_metrics, 12);
        assert_eq!(ROUTER_LINK_FIELDS.layout.tail(), Some(12));
        assert_eq!(*ROUTER_LINK_FIXED_LENGTH, 12);
    }

    #[test]
    fn tos_entries_follow_each_other() {
        let (tos, metric) = ROUTER_LINK_FIELDS.tos_entry(0);
        assert_eq!((tos.offset, tos.length), (12, 1));
        assert_eq!((metric.offset, metric.length), (14, 2));

        let (tos, metric) = ROUTER_LINK_FIELDS.tos_entry(2);
        assert_eq!((tos.offset, tos.length), (20, 1));
        assert_eq!((metric.offset, metric.length), (22, 2));
    }

    #[test]
    fn reads_stub_link() {
        let link = RouterLink::parse(SharedBuffer::from_slice(&STUB_LINK), 0).unwrap();

        assert_eq!(link.link_id().unwrap(), Ipv4Addr::new(10, 1, 0, 0));
        assert_eq!(link.link_data().unwrap(), Ipv4Addr::new(255, 255, 0, 0));
        assert_eq!(link.link_type().unwrap(), RouterLinkType::STUB);
        assert_eq!(link.tos_number().unwrap(), 1);
        assert_eq!(link.metric().unwrap(), 10);
        assert_eq!(link.record_length().unwrap(), 16);
        assert_eq!(link.header().length(), 16);
        assert_eq!(
            link.additional_metrics().unwrap(),
            vec![TosMetric { tos: 2, metric: 20 }]
        );
    }

    #[test]
    fn tos_entries_must_fit_the_buffer() {
        let truncated = STUB_LINK[..14].to_vec();
        let err = RouterLink::parse(SharedBuffer::from_vec(truncated), 0)
            .err()
            .unwrap();
        assert!(err.is_range_error());
    }

    #[test]
    fn from_view_checks_record_length() {
        let buffer = SharedBuffer::from_slice(&STUB_LINK);

        assert!(RouterLink::from_view(buffer.view(0, 12).unwrap()).is_err());
        assert!(RouterLink::from_view(buffer.view(0, 16).unwrap()).is_ok());
    }

    #[test]
    fn rewrites_additional_metrics() {
        let buffer = SharedBuffer::with_capacity(24);
        let mut link = RouterLink::parse(buffer.clone(), 0).unwrap();
        link.set_link_id(Ipv4Addr::new(192, 168, 0, 1)).unwrap();
        link.set_link_data(Ipv4Addr::new(192, 168, 0, 2)).unwrap();
        link.set_link_type(RouterLinkType::POINT_TO_POINT).unwrap();
        link.set_metric(1).unwrap();
        link.set_additional_metrics(&[
            TosMetric { tos: 4, metric: 0x0102 },
            TosMetric { tos: 8, metric: 7 },
        ])
        .unwrap();

        assert_eq!(link.record_length().unwrap(), 20);
        assert_eq!(
            buffer.to_vec()[..20].to_vec(),
            vec![
                192, 168, 0, 1, 192, 168, 0, 2, 0x01, 0x02, 0x00, 0x01, 0x04, 0x00, 0x01, 0x02,
                0x08, 0x00, 0x00, 0x07
            ]
        );

        let reread = RouterLink::parse(buffer, 0).unwrap();
        assert_eq!(reread.additional_metrics().unwrap().len(), 2);
    }

    #[test]
    fn too_many_metrics_leave_the_record_alone() {
        let buffer = SharedBuffer::from_slice(&STUB_LINK);
        let mut link = RouterLink::parse(buffer.clone(), 0).unwrap();
        let metrics = vec![TosMetric { tos: 0, metric: 0 }; 3];

        assert!(link.set_additional_metrics(&metrics).unwrap_err().is_range_error());
        assert_eq!(buffer.to_vec(), STUB_LINK.to_vec());
    }

    #[test]
    fn unknown_link_type_is_preserved() {
        let mut bytes = STUB_LINK;
        bytes[8] = 9;
        let link = RouterLink::parse(SharedBuffer::from_slice(&bytes), 0).unwrap();

        assert_eq!(link.link_type().unwrap().raw(), 9);
        assert!(!link.link_type().unwrap().is_known());
    }

    #[test]
    fn link_prints_its_header() {
        let link = RouterLink::parse(SharedBuffer::from_slice(&STUB_LINK), 0).unwrap();
        let printed = format!("{:?}", link);

        assert!(printed.starts_with("RouterLink { header: HeaderView {"));
        assert!(printed.contains("length: 16"));
    }
}
