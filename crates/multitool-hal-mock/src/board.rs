// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

use std::marker::PhantomData;

use multitool_hal::{Board, TimeProvider};

use crate::{MockTagReader, RecordingCarrier, RecordingDisplay, RecordingLink, ScriptedIrReceiver};

/// Board made entirely of fakes, over any clock
///
/// Tests use `MockBoard<FakeClock>`; the host simulator uses
/// `MockBoard<StdClock>` so pacing and timeouts run in real time.
#[derive(Debug, Default)]
pub struct MockBoard<C>(PhantomData<C>);

impl<C> Board for MockBoard<C>
where
    C: TimeProvider + Clone + Send + Sync + 'static,
{
    type Clock = C;
    type IrReceiver = ScriptedIrReceiver<C>;
    type IrCarrier = RecordingCarrier<C>;
    type Tags = MockTagReader;
    type Display = RecordingDisplay;
    type Link = RecordingLink;

    const NAME: &'static str = "Mock board";
}
