//! Shared fixtures for result grammar tests
//!
//! One small results block per vendor layout, header line included.


pub const SEX_BRACKET_BLOCK: &str = "\
Place  Bib Name                    Time   Sex/Pl   Div    Div/Pl
    1  101 JORDAN FEWER            15:45  M(1/52)  20-29  1/12
    2  117 JOE DUNFORD (NLAA)      16:02  M(2/52)  40-49  1/9
    3   88 ANNE MARIE KELLY        17:30  F(1/31)  30-39  1/7
";

pub const CHIP_TIME_BLOCK: &str = "\
 Pos   Bib Name                    Gun     Chip  S  SPos Cat   CPos
   1  3001 GREG WALSH              49:10    49:09 M     1 30-39     1
   2  3662 COLIN FEWER             49:31    49:25 M     2 40-49     1
   3  3120 SARAH SNOW              52:40          F     1 20-29     1
";

pub const SLASH_PAIRS_BLOCK: &str = "\
Pl.  Bib Name                 Sex/Pl  Cat/Pl   Time
  1.  201 MARK GILLINGHAM      M/1     20-29/1  15:58
  2.  214 PATRICK O'GRADY      M/2     U20/1    16:51
  3.  230 LISA BUTLER          F/1     30-39/1  18:02
";

pub const PACE_BLOCK: &str = "\
Place Name                   No.  S Div   DPl  Time    Pace
    1 JOE DUNFORD             412 M 50-59    1  35:10  5:40/km
    2 MEGAN POWER             433 F 20-29    1  36:45  5:55/km
";

pub const TWO_LINE_BLOCK: &str = "\
Pos  Bib  Name
           Time  Sex SPos Cat  CPos
   1   57 ANDREA WEBB
          18:22  F   1    30-39  1
   2   64 KEVIN BYRNE (RCR)
          18:40  M   1    40-49  1
";
